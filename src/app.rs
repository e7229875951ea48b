use crate::config::ViewerConfig;
use crate::message::Message;
use crate::model::loader::load_dicom;
use crate::model::Session;
use crate::pipeline::HandleSurface;
use crate::views::{image_panel, metadata_panel, window_controls};
use iced::widget::text::Wrapping;
use iced::widget::{button, column, container, row, text};
use iced::{application, Alignment, Element, Length, Task, Theme};
use rfd::AsyncFileDialog;

const APP_TITLE: &str = "DICOM View";

/// Offered in order; the first is selected. Many DICOM files carry no extension.
const FILE_FILTERS: &[(&str, &[&str])] = &[
    ("DICOM", &["dcm", "dicom"]),
    ("All files", &["*"]),
];

pub fn run() -> iced::Result {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .try_init();

    let config = ViewerConfig::from_env();
    log::debug!("Viewer configuration: {config:?}");

    application(APP_TITLE, App::update, App::view)
        .theme(App::theme)
        .run_with(move || (App::new(config), Task::none()))
}

pub struct App {
    config: ViewerConfig,
    session: Session<HandleSurface>,
}

impl App {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            session: Session::new(HandleSurface::default()),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => Task::perform(
                async {
                    FILE_FILTERS
                        .iter()
                        .fold(AsyncFileDialog::new(), |dialog, (name, extensions)| {
                            dialog.add_filter(*name, *extensions)
                        })
                        .pick_file()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::FileChosen,
            ),
            Message::FileChosen(None) => Task::none(),
            Message::FileChosen(Some(path)) => {
                let generation = self.session.begin_load();
                Task::perform(
                    async move { load_dicom(path).map_err(|err| err.to_string()) },
                    move |result| Message::FileLoaded(generation, result),
                )
            }
            Message::FileLoaded(generation, result) => {
                self.session.finish_load(generation, result);
                Task::none()
            }
            Message::WindowCenterChanged(center) => {
                self.session.set_center(self.config.center_bounds.clamp(center));
                Task::none()
            }
            Message::WindowWidthChanged(width) => {
                self.session.set_width(self.config.width_bounds.clamp(width));
                Task::none()
            }
            Message::ResetWindow => {
                self.session.reset_window();
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let open_button = button("Open DICOM File").on_press(Message::PickFile);

        let image = self.session.image();
        let metadata = container(metadata_panel(
            image,
            self.session.window(),
            self.session.effective_window(),
        ))
        .padding(16)
        .width(Length::FillPortion(2));

        let viewer = container(
            column![
                image_panel(self.session.surface(), image.is_some()),
                window_controls(&self.config, self.session.effective_window()),
            ]
            .spacing(16),
        )
        .padding(16)
        .width(Length::FillPortion(5))
        .height(Length::Fill)
        .align_x(Alignment::Center);

        let mut content = column![open_button];
        if let Some(error) = self.session.last_error() {
            content = content.push(text(error).size(16).wrapping(Wrapping::Word));
        }

        content
            .push(
                row![metadata, viewer]
                    .spacing(16)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .padding(20)
            .spacing(20)
            .align_x(Alignment::Start)
            .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}
