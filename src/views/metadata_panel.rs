use crate::message::Message;
use crate::model::LoadedImage;
use crate::pipeline::{WindowLevel, WindowParameters};
use iced::widget::text::Wrapping;
use iced::widget::{column, row, scrollable, text};
use iced::{Element, Length};

pub fn metadata_panel(
    image: Option<&LoadedImage>,
    window: WindowParameters,
    applied: Option<WindowLevel>,
) -> Element<'static, Message> {
    let Some(image) = image else {
        return text("No image loaded").into();
    };

    let descriptor = &image.descriptor;
    let mut rows = vec![
        ("Columns", descriptor.width.to_string()),
        ("Rows", descriptor.height.to_string()),
        ("Bits Allocated", descriptor.bits_allocated.to_string()),
        ("Bits Stored", descriptor.bits_stored.to_string()),
        (
            "Pixel Representation",
            match descriptor.pixel_representation {
                0 => "0 (unsigned)".to_string(),
                1 => "1 (signed)".to_string(),
                other => other.to_string(),
            },
        ),
        ("Samples per Pixel", descriptor.samples_per_pixel.to_string()),
        (
            "Photometric Interpretation",
            descriptor.photometric_interpretation.to_string(),
        ),
        ("Window Center", optional(descriptor.default_window_center)),
        ("Window Width", optional(descriptor.default_window_width)),
    ];
    if let Some(applied) = applied {
        rows.push((
            "Applied Center",
            with_source(applied.center(), window.center),
        ));
        rows.push((
            "Applied Width",
            with_source(applied.width(), window.width),
        ));
    }

    let table = rows.into_iter().fold(column![].spacing(8), |table, (label, value)| {
        table.push(
            row![
                text(label).width(Length::FillPortion(2)),
                text(value)
                    .width(Length::FillPortion(3))
                    .wrapping(Wrapping::Word),
            ]
            .spacing(12),
        )
    });

    column![
        text(format!("File: {}", image.file_path.display())).size(16),
        scrollable(table),
    ]
    .spacing(12)
    .into()
}

/// Marks values derived from the sample range rather than chosen.
fn with_source(value: f64, chosen: Option<f64>) -> String {
    if chosen == Some(value) {
        value.to_string()
    } else {
        format!("{value} (auto)")
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "(not set)".to_string(), |value| value.to_string())
}
