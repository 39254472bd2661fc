use audio_fetcher::{app, logging};
use iced::window;
use image::{Rgba, RgbaImage};

const ICON_SIZE: u32 = 64;

/// A filled disc with a notch, drawn at startup instead of shipping an asset.
fn window_icon() -> Option<window::Icon> {
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 2.0;

    let img = RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance > radius {
            Rgba([0, 0, 0, 0])
        } else if distance < radius / 4.0 {
            Rgba([245, 245, 245, 255])
        } else {
            Rgba([220, 60, 60, 255])
        }
    });

    let (width, height) = img.dimensions();
    window::icon::from_rgba(img.into_raw(), width, height).ok()
}

fn main() -> iced::Result {
    logging::init_logging();

    iced::application(app::DownloadApp::default, app::update, app::view)
        .title(app::WINDOW_TITLE)
        .window(window::Settings {
            icon: window_icon(),
            ..Default::default()
        })
        .run()
}
