use super::loader::LoadedImage;
use crate::error::Result;
use crate::pipeline::{compose, present, DisplaySurface, WindowLevel, WindowParameters};

/// State behind the viewer: the loaded image, its current window and the
/// surface it is drawn on.
///
/// A failed load or render never touches the surface, so the last good image
/// stays on screen.
#[derive(Debug, Default)]
pub struct Session<S> {
    generation: u64,
    image: Option<LoadedImage>,
    window: WindowParameters,
    surface: S,
    last_error: Option<String>,
}

impl<S: DisplaySurface> Session<S> {
    pub fn new(surface: S) -> Self {
        Self {
            generation: 0,
            image: None,
            window: WindowParameters::default(),
            surface,
            last_error: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn window(&self) -> WindowParameters {
        self.window
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The window actually applied to the current image, if it is grayscale.
    pub fn effective_window(&self) -> Option<WindowLevel> {
        let image = self.image.as_ref()?;
        image
            .descriptor
            .photometric_interpretation
            .is_monochrome()
            .then(|| self.window.resolve(&image.samples))
    }

    /// Start a new load; any load started earlier becomes stale.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply the outcome of the load tagged `generation`.
    ///
    /// Returns `false` if a newer load has started since, in which case the
    /// result is dropped.
    pub fn finish_load(&mut self, generation: u64, result: Result<LoadedImage, String>) -> bool {
        if generation != self.generation {
            log::debug!(
                "Discarding stale load {generation} (current is {})",
                self.generation
            );
            return false;
        }

        match result {
            Ok(image) => {
                let window = image.default_window();
                match compose(&image.descriptor, &image.samples, window) {
                    Ok(rgba) => {
                        log::info!("Displaying {}", image.file_path.display());
                        present(rgba, &mut self.surface);
                        self.image = Some(image);
                        self.window = window;
                        self.last_error = None;
                    }
                    Err(err) => self.fail(format!("{}: {err}", image.file_path.display())),
                }
            }
            Err(err) => self.fail(err),
        }
        true
    }

    pub fn set_center(&mut self, center: f64) {
        self.rewindow(self.window.with_center(center));
    }

    pub fn set_width(&mut self, width: f64) {
        self.rewindow(self.window.with_width(width));
    }

    /// Go back to the window stored in the file.
    pub fn reset_window(&mut self) {
        if let Some(window) = self.image.as_ref().map(LoadedImage::default_window) {
            self.rewindow(window);
        }
    }

    fn rewindow(&mut self, window: WindowParameters) {
        let Some(image) = &self.image else {
            return;
        };
        match compose(&image.descriptor, &image.samples, window) {
            Ok(rgba) => {
                present(rgba, &mut self.surface);
                self.window = window;
                self.last_error = None;
            }
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn fail(&mut self, message: String) {
        log::error!("{message}");
        self.last_error = Some(message);
    }
}
