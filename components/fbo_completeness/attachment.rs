/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use euclid::default::Size2D;
use serde::{Deserialize, Serialize};
use sparkle::gl;
use sparkle::gl::types::{GLenum, GLsizei};

use crate::format::FormatFlags;

/// Opaque identity of the image backing an attachment (a renderbuffer or a
/// single texture level). The checker only ever compares these for equality;
/// it never dereferences them.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ImageName(pub u32);

/// A named slot on a framebuffer object.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum AttachmentPoint {
    /// `COLOR_ATTACHMENTn`.
    Color(u32),
    Depth,
    Stencil,
    DepthStencil,
}

impl AttachmentPoint {
    pub fn as_gl_constant(&self) -> GLenum {
        match *self {
            AttachmentPoint::Color(n) => gl::COLOR_ATTACHMENT0 + n,
            AttachmentPoint::Depth => gl::DEPTH_ATTACHMENT,
            AttachmentPoint::Stencil => gl::STENCIL_ATTACHMENT,
            AttachmentPoint::DepthStencil => gl::DEPTH_STENCIL_ATTACHMENT,
        }
    }

    /// The renderability capabilities an image format needs in order to be
    /// attachment complete at this point.
    pub fn required_renderable(&self) -> FormatFlags {
        match *self {
            AttachmentPoint::Color(_) => FormatFlags::COLOR_RENDERABLE,
            AttachmentPoint::Depth => FormatFlags::DEPTH_RENDERABLE,
            AttachmentPoint::Stencil => FormatFlags::STENCIL_RENDERABLE,
            AttachmentPoint::DepthStencil => {
                FormatFlags::DEPTH_RENDERABLE | FormatFlags::STENCIL_RENDERABLE
            },
        }
    }
}

/// How an image is bound to an attachment point. An unbound point has no
/// `Attachment` at all, so there is no variant for it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum AttachmentKind {
    Renderbuffer,
    /// A single level of a 2D or cube-map texture.
    Texture,
    /// One layer of a 3D or array texture, selected by `Attachment::layer`.
    TextureLayered,
}

/// One bound image, as seen from an attachment point.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Attachment {
    pub image: ImageName,
    pub kind: AttachmentKind,
    /// Selected layer; only meaningful for `AttachmentKind::TextureLayered`.
    pub layer: GLsizei,
}

impl Attachment {
    pub fn renderbuffer(image: ImageName) -> Self {
        Attachment {
            image,
            kind: AttachmentKind::Renderbuffer,
            layer: 0,
        }
    }

    pub fn texture(image: ImageName) -> Self {
        Attachment {
            image,
            kind: AttachmentKind::Texture,
            layer: 0,
        }
    }

    pub fn texture_layer(image: ImageName, layer: GLsizei) -> Self {
        Attachment {
            image,
            kind: AttachmentKind::TextureLayered,
            layer,
        }
    }
}

/// Resolved description of a backing image: everything the completeness
/// rules may ask of it. Borrowed by the checker for the duration of a single
/// `check` call and never retained.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ImageInfo {
    size: Size2D<GLsizei>,
    layers: GLsizei,
    samples: GLsizei,
    flags: FormatFlags,
}

impl ImageInfo {
    pub fn renderbuffer(size: Size2D<GLsizei>, samples: GLsizei, flags: FormatFlags) -> Self {
        ImageInfo {
            size,
            layers: 1,
            samples,
            flags,
        }
    }

    /// A single texture level. Texture images report zero samples for the
    /// purposes of the multisample rule, whatever their storage looks like.
    pub fn texture(size: Size2D<GLsizei>, flags: FormatFlags) -> Self {
        ImageInfo {
            size,
            layers: 1,
            samples: 0,
            flags,
        }
    }

    /// A level of a 3D or array texture with the given number of layers.
    pub fn layered_texture(size: Size2D<GLsizei>, layers: GLsizei, flags: FormatFlags) -> Self {
        ImageInfo {
            size,
            layers,
            samples: 0,
            flags,
        }
    }

    pub fn size(&self) -> Size2D<GLsizei> {
        self.size
    }

    pub fn layers(&self) -> GLsizei {
        self.layers
    }

    /// The `RENDERBUFFER_SAMPLES` of the image; zero for any texture image
    /// and for non-multisampled renderbuffers.
    pub fn num_samples(&self) -> GLsizei {
        self.samples
    }

    pub fn flags(&self) -> FormatFlags {
        self.flags
    }
}
