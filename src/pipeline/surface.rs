use super::compose::RgbaImage;
use iced::widget::image::Handle;

/// Something an [`RgbaImage`] can be drawn onto.
pub trait DisplaySurface {
    fn resize(&mut self, width: u32, height: u32);

    fn blit(&mut self, image: RgbaImage);
}

/// Size the surface to the image, then draw it.
pub fn present<S>(image: RgbaImage, surface: &mut S)
where
    S: DisplaySurface + ?Sized,
{
    surface.resize(image.width, image.height);
    surface.blit(image);
}

/// Surface backing the iced image widget.
#[derive(Debug, Clone, Default)]
pub struct HandleSurface {
    width: u32,
    height: u32,
    handle: Option<Handle>,
}

impl HandleSurface {
    pub fn handle(&self) -> Option<&Handle> {
        self.handle.as_ref()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl DisplaySurface for HandleSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn blit(&mut self, image: RgbaImage) {
        self.handle = Some(Handle::from_rgba(self.width, self.height, image.pixels));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::descriptor::tests::descriptor;
    use crate::pipeline::{compose, SampleBuffer, WindowParameters};

    /// Records every blit, for asserting on what the shell displayed.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub(crate) size: (u32, u32),
        pub(crate) frames: Vec<RgbaImage>,
    }

    impl DisplaySurface for RecordingSurface {
        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn blit(&mut self, image: RgbaImage) {
            self.frames.push(image);
        }
    }

    fn gradient() -> RgbaImage {
        let image = descriptor(3, 2, 8, 0, 1, "MONOCHROME2", vec![0, 1, 2, 3, 4, 5]);
        let samples = SampleBuffer::U8(vec![0, 1, 2, 3, 4, 5]);
        compose(&image, &samples, WindowParameters::default()).unwrap()
    }

    #[test]
    fn present_resizes_before_blitting() {
        let rgba = gradient();
        let mut surface = RecordingSurface::default();
        present(rgba.clone(), &mut surface);
        assert_eq!(surface.size, (3, 2));
        assert_eq!(surface.frames, vec![rgba]);
    }

    #[test]
    fn handle_surface_tracks_dimensions() {
        let mut surface = HandleSurface::default();
        assert!(surface.handle().is_none());

        present(gradient(), &mut surface);
        assert_eq!(surface.dimensions(), (3, 2));
        assert!(surface.handle().is_some());
    }
}
