use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use egui::{ColorImage, Context, Id, TextureHandle, TextureOptions};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "icons/"]
struct Assets;

pub const SEND_ICON: &str = "send.png";
pub const RECEIVE_ICON: &str = "receive.png";
pub const ADD_ICON: &str = "add.png";
pub const TOKEN_ICON: &str = "token.png";

#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("Icon {0} not found in embedded assets")]
    NotFound(String),
    #[error("Icon {name} could not be decoded: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded icon plus a key that changes whenever its pixels do.
#[derive(Clone)]
pub struct ButtonIcon {
    name: String,
    image: Arc<ColorImage>,
    key: u64,
}

impl std::fmt::Debug for ButtonIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonIcon")
            .field("name", &self.name)
            .field("size", &self.image.size)
            .field("key", &self.key)
            .finish()
    }
}

impl ButtonIcon {
    pub fn from_image(name: impl Into<String>, image: ColorImage) -> Self {
        let name = name.into();
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        image.size.hash(&mut hasher);
        image.pixels.hash(&mut hasher);
        Self {
            key: hasher.finish(),
            name,
            image: Arc::new(image),
        }
    }

    pub fn from_png_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, IconError> {
        let name = name.into();
        let image = image::load_from_memory(bytes).map_err(|source| IconError::Decode {
            name: name.clone(),
            source,
        })?;
        let size = [image.width() as usize, image.height() as usize];
        let pixels = image.into_rgba8().into_raw();
        Ok(Self::from_image(
            name,
            ColorImage::from_rgba_unmultiplied(size, &pixels),
        ))
    }

    pub fn embedded(name: &str) -> Result<Self, IconError> {
        let content = Assets::get(name).ok_or_else(|| IconError::NotFound(name.to_string()))?;
        Self::from_png_bytes(name, &content.data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &ColorImage {
        &self.image
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    /// Texture for the normal state, uploaded once per context.
    pub fn texture(&self, ctx: &Context) -> TextureHandle {
        let id = Id::new(("button_icon", self.key));
        if let Some(texture) = ctx.data_mut(|d| d.get_temp::<TextureHandle>(id)) {
            return texture;
        }
        let texture = ctx.load_texture(
            self.name.clone(),
            (*self.image).clone(),
            TextureOptions::default(),
        );
        ctx.data_mut(|d| d.insert_temp(id, texture.clone()));
        texture
    }
}

/// The icons the token panel uses. Missing icons fall back to text-only buttons.
#[derive(Debug, Clone, Default)]
pub struct TokenIcons {
    pub send: Option<ButtonIcon>,
    pub receive: Option<ButtonIcon>,
    pub add: Option<ButtonIcon>,
    pub token: Option<ButtonIcon>,
}

impl TokenIcons {
    pub fn load() -> Self {
        let load = |name: &str| match ButtonIcon::embedded(name) {
            Ok(icon) => Some(icon),
            Err(err) => {
                tracing::warn!(%err, "Failed to load icon");
                None
            }
        };
        Self {
            send: load(SEND_ICON),
            receive: load(RECEIVE_ICON),
            add: load(ADD_ICON),
            token: load(TOKEN_ICON),
        }
    }
}

#[cfg(test)]
pub(crate) fn solid(size: [usize; 2], rgba: [u8; 4]) -> ColorImage {
    let pixels: Vec<u8> = rgba.repeat(size[0] * size[1]);
    ColorImage::from_rgba_unmultiplied(size, &pixels)
}
