use crate::config::ViewerConfig;
use crate::message::Message;
use crate::pipeline::{HandleSurface, WindowLevel};
use iced::widget::{button, column, row, slider, text, Column, Image};
use iced::{Element, Length};

pub fn image_panel(surface: &HandleSurface, has_image: bool) -> Element<'static, Message> {
    match surface.handle() {
        Some(handle) => {
            let (width, height) = surface.dimensions();
            column![
                Image::new(handle.clone())
                    .width(Length::Fill)
                    .height(Length::Fill),
                text(format!("{width} x {height}")).size(12),
            ]
            .spacing(4)
            .into()
        }
        None if has_image => text("No preview available").into(),
        None => text("Open a DICOM file to display it").into(),
    }
}

/// Leveling sliders; empty for images that are not windowed (RGB).
pub fn window_controls(
    config: &ViewerConfig,
    window: Option<WindowLevel>,
) -> Column<'static, Message> {
    let Some(window) = window else {
        return column![];
    };

    let center = config.center_bounds.clamp(window.center());
    let width = config.width_bounds.clamp(window.width());

    column![
        text(format!("Window Center: {}", window.center().round())),
        slider(
            config.center_bounds.range(),
            center,
            Message::WindowCenterChanged
        )
        .step(1.0),
        text(format!("Window Width: {}", window.width().round())),
        slider(config.width_bounds.range(), width, Message::WindowWidthChanged).step(1.0),
        row![button("Reset window").on_press(Message::ResetWindow)],
    ]
    .spacing(8)
    .width(Length::Fill)
}
