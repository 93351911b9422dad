use super::*;
use std::fs;
use tempfile::tempdir;

fn titles(tracks: &[Track], idx: &[usize]) -> Vec<String> {
    idx.iter().map(|&i| tracks[i].title().to_string()).collect()
}

#[test]
fn prefix_search_is_case_insensitive_and_ordered() {
    let tracks = vec![
        Track::new("Track 1", "0:10", "/1"),
        Track::new("Track 2", "0:20", "/2"),
        Track::new("Lying Down", "0:30", "/3"),
    ];

    assert_eq!(titles(&tracks, &matching_indices(&tracks, "tr")), vec!["Track 1", "Track 2"]);
    assert_eq!(
        titles(&tracks, &matching_indices(&tracks, "")),
        vec!["Track 1", "Track 2", "Lying Down"]
    );
    assert_eq!(titles(&tracks, &matching_indices(&tracks, "LY")), vec!["Lying Down"]);
    // Prefix only, not substring.
    assert!(matching_indices(&tracks, "down").is_empty());
}

#[test]
fn resources_dir_is_found_in_an_ancestor() {
    let root = tempdir().unwrap();
    fs::create_dir(root.path().join("Resources")).unwrap();
    let deep = root.path().join("a").join("b").join("c");
    fs::create_dir_all(&deep).unwrap();

    assert_eq!(
        locate_resources_dir(&deep, 15),
        Some(root.path().join("Resources"))
    );
    // Three hops are needed; two are not enough.
    assert_eq!(locate_resources_dir(&deep, 2), None);
}

#[test]
fn configured_playlist_path_wins_over_lookup() {
    let root = tempdir().unwrap();
    fs::create_dir(root.path().join("Resources")).unwrap();
    let configured = root.path().join("elsewhere.txt");

    assert_eq!(
        locate_playlist_file(Some(&configured), root.path(), "playlist.txt", 15),
        Some(configured.clone())
    );
    assert_eq!(
        locate_playlist_file(None, root.path(), "playlist.txt", 15),
        Some(root.path().join("Resources").join("playlist.txt"))
    );
}

#[test]
fn no_resources_means_no_library() {
    let root = tempdir().unwrap();
    assert_eq!(locate_playlist_file(None, root.path(), "playlist.txt", 0), None);
}
