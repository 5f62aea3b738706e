use snaptex_app::JobId;

/// Events delivered onto the overlay window thread, either from the
/// background recognition task or from the viewer window's buttons.
#[derive(Debug, Clone)]
pub enum HostEvent {
    RecognitionFinished {
        job: JobId,
        text: String,
        failed: bool,
    },
    ViewerCopy {
        text: String,
    },
    ViewerClosed,
}
