use image::RgbaImage;
use snaptex_platform::PlatformServicesError;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::*;

fn resource(msg: impl Into<String>) -> PlatformServicesError {
    PlatformServicesError::Capture(msg.into())
}

/// Grab a rectangular screen region into an RGBA pixel buffer.
///
/// `left`/`top` are screen coordinates. A zero-size region is legal input and
/// returns an empty buffer instead of failing; the caller decides what an
/// empty capture means.
pub fn capture_screen_region(
    left: i32,
    top: i32,
    width: i32,
    height: i32,
) -> Result<RgbaImage, PlatformServicesError> {
    if width <= 0 || height <= 0 {
        return Ok(RgbaImage::new(0, 0));
    }

    unsafe {
        let desktop = HWND(std::ptr::null_mut());
        let screen_dc = GetDC(Some(desktop));
        if screen_dc.is_invalid() {
            return Err(resource("GetDC failed"));
        }

        let result = (|| {
            let mem_dc = CreateCompatibleDC(Some(screen_dc));
            if mem_dc.is_invalid() {
                return Err(resource("CreateCompatibleDC failed"));
            }

            let result = (|| {
                let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
                if bitmap.is_invalid() {
                    return Err(resource("CreateCompatibleBitmap failed"));
                }
                let old_bitmap = SelectObject(mem_dc, bitmap.into());

                let result = (|| {
                    BitBlt(
                        mem_dc,
                        0,
                        0,
                        width,
                        height,
                        Some(screen_dc),
                        left,
                        top,
                        SRCCOPY,
                    )
                    .map_err(|e| resource(format!("BitBlt failed: {e:?}")))?;

                    read_bitmap_rgba(mem_dc, bitmap, width, height)
                })();

                SelectObject(mem_dc, old_bitmap);
                let _ = DeleteObject(bitmap.into());
                result
            })();

            let _ = DeleteDC(mem_dc);
            result
        })();

        let _ = ReleaseDC(Some(desktop), screen_dc);
        result
    }
}

/// Read a 32bpp top-down copy of `bitmap` and convert BGRA to RGBA.
unsafe fn read_bitmap_rgba(
    dc: HDC,
    bitmap: HBITMAP,
    width: i32,
    height: i32,
) -> Result<RgbaImage, PlatformServicesError> {
    let mut info = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            // Negative height selects a top-down pixel layout.
            biHeight: -height,
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];
    let scan_lines = unsafe {
        GetDIBits(
            dc,
            bitmap,
            0,
            height as u32,
            Some(pixels.as_mut_ptr() as *mut _),
            &mut info,
            DIB_RGB_COLORS,
        )
    };
    if scan_lines != height {
        return Err(resource("GetDIBits returned a truncated bitmap"));
    }

    // GDI hands back BGRA with an undefined alpha channel.
    for pixel in pixels.chunks_exact_mut(4) {
        pixel.swap(0, 2);
        pixel[3] = 0xFF;
    }

    RgbaImage::from_raw(width as u32, height as u32, pixels)
        .ok_or_else(|| resource("pixel buffer size mismatch"))
}

/// A full-screen snapshot kept selected into a memory DC so the overlay can
/// paint it as its background.
///
/// Lives on the UI thread for the lifetime of the overlay window.
pub struct ScreenBackground {
    mem_dc: HDC,
    bitmap: HBITMAP,
    old_bitmap: HGDIOBJ,
    width: i32,
    height: i32,
}

impl ScreenBackground {
    /// Snapshot the whole screen.
    pub fn snapshot(width: i32, height: i32) -> Result<Self, PlatformServicesError> {
        unsafe {
            let desktop = HWND(std::ptr::null_mut());
            let screen_dc = GetDC(Some(desktop));
            if screen_dc.is_invalid() {
                return Err(resource("GetDC failed"));
            }

            let result = (|| {
                let mem_dc = CreateCompatibleDC(Some(screen_dc));
                if mem_dc.is_invalid() {
                    return Err(resource("CreateCompatibleDC failed"));
                }

                let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
                if bitmap.is_invalid() {
                    let _ = DeleteDC(mem_dc);
                    return Err(resource("CreateCompatibleBitmap failed"));
                }

                let old_bitmap = SelectObject(mem_dc, bitmap.into());

                if let Err(e) = BitBlt(
                    mem_dc,
                    0,
                    0,
                    width,
                    height,
                    Some(screen_dc),
                    0,
                    0,
                    SRCCOPY,
                ) {
                    SelectObject(mem_dc, old_bitmap);
                    let _ = DeleteObject(bitmap.into());
                    let _ = DeleteDC(mem_dc);
                    return Err(resource(format!("BitBlt failed: {e:?}")));
                }

                Ok(Self {
                    mem_dc,
                    bitmap,
                    old_bitmap,
                    width,
                    height,
                })
            })();

            let _ = ReleaseDC(Some(desktop), screen_dc);
            result
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Blit the snapshot onto `dest` at the origin.
    pub fn blit_to(&self, dest: HDC) {
        unsafe {
            let _ = BitBlt(
                dest,
                0,
                0,
                self.width,
                self.height,
                Some(self.mem_dc),
                0,
                0,
                SRCCOPY,
            );
        }
    }
}

impl Drop for ScreenBackground {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.mem_dc, self.old_bitmap);
            let _ = DeleteObject(self.bitmap.into());
            let _ = DeleteDC(self.mem_dc);
        }
    }
}
