/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Capabilities of an image format, as established by the format tables
    /// of GLES 3.0 section 3.8.3 and the renderbuffer format list. The
    /// tables themselves belong to the caller; the checker only consumes
    /// the bits attached to each image.
    ///
    /// Serde impls come from the `bitflags` serde feature.
    #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
    pub struct FormatFlags: u8 {
        const COLOR_RENDERABLE = 1 << 0;
        const DEPTH_RENDERABLE = 1 << 1;
        const STENCIL_RENDERABLE = 1 << 2;
        /// The format may back a renderbuffer.
        const RENDERBUFFER_VALID = 1 << 3;
        /// The format may back a texture image.
        const TEXTURE_VALID = 1 << 4;
    }
}
