use snaptex_mathpix::{MathpixClient, MathpixConfig};
use snaptex_platform::{HostPlatform, WindowId};
use snaptex_platform_windows::win32::{CS_DBLCLKS, CS_HREDRAW, CS_OWNDC, Result};
use snaptex_platform_windows::windows::{
    UserEventSender, WindowsHostPlatform, run_fullscreen_overlay_app,
};

use crate::{App, HostEvent, WINDOW_CLASS_NAME};

/// Run one capture/recognize/view cycle: overlay up, drag, recognize, viewer.
///
/// Returns when the overlay window is destroyed.
pub fn run(config: MathpixConfig) -> Result<()> {
    let client = MathpixClient::new(config);

    run_fullscreen_overlay_app(
        WINDOW_CLASS_NAME,
        CS_DBLCLKS | CS_OWNDC | CS_HREDRAW,
        move |window: WindowId, screen_size, events: UserEventSender<HostEvent>| {
            let host_platform: Box<dyn HostPlatform<WindowHandle = WindowId>> =
                Box::new(WindowsHostPlatform::new());

            App::new(window, screen_size, events, host_platform, client)
        },
    )
}
