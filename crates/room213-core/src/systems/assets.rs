use crate::FontLoader;
use skia_safe::{Data, Font, FontMgr, FontStyle, Typeface};
use tracing::{debug, warn};

/// Family the door plaque was designed around.
pub const PLAQUE_FAMILY: &str = "Fira Sans";

/// The one typeface the vignette needs, resolved once up front.
///
/// Resolution order: bytes from the [`FontLoader`], then the system font manager
/// (`Fira Sans`, then any sans-serif). With no font at all, text is simply not drawn.
#[derive(Clone, Default)]
pub struct FontBook {
    typeface: Option<Typeface>,
}

impl FontBook {
    pub fn load(loader: &dyn FontLoader) -> Self {
        let font_mgr = FontMgr::new();
        let bundled = loader.load_font().and_then(|bytes| {
            let data = Data::new_copy(&bytes);
            let typeface = font_mgr.new_from_data(&data, 0);
            if typeface.is_none() {
                warn!("Bundled font bytes could not be parsed; using system fonts");
            }
            typeface
        });
        let typeface = bundled.or_else(|| {
            font_mgr
                .match_family_style(PLAQUE_FAMILY, FontStyle::normal())
                .or_else(|| font_mgr.match_family_style("sans-serif", FontStyle::normal()))
                .or_else(|| font_mgr.match_family_style("", FontStyle::normal()))
        });
        match &typeface {
            Some(tf) => debug!(family = %tf.family_name(), "plaque typeface resolved"),
            None => warn!("No typeface available; text will be skipped"),
        }
        Self { typeface }
    }

    /// A book with no typeface. Text drawing becomes a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_typeface(&self) -> bool {
        self.typeface.is_some()
    }

    pub fn font(&self, size: f32) -> Option<Font> {
        self.typeface
            .as_ref()
            .map(|typeface| Font::new(typeface.clone(), Some(size)))
    }
}
