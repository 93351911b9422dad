use rodio::mixer::Mixer;
use rodio::{OutputStream, OutputStreamBuilder};

use super::DeckError;
use super::transport::RodioTransport;

/// The default output device. Its mixer sums every deck's sink; it must
/// outlive the transports created from it.
pub struct AudioOutput {
    stream: OutputStream,
}

impl AudioOutput {
    pub fn open_default() -> Result<Self, DeckError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped, which would
        // land on top of the TUI.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }

    pub fn mixer(&self) -> &Mixer {
        self.stream.mixer()
    }

    pub fn new_transport(&self) -> RodioTransport {
        RodioTransport::new(self)
    }
}
