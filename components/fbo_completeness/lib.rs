/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Decision engine for OpenGL ES 3 framebuffer completeness.
//!
//! Callers describe the images bound to a framebuffer's attachment points as
//! plain data; the checker evaluates the GLES 3.0 section 4.4.4 rules and
//! records every violation it finds, tagged with the GL status enum a driver
//! would report and with whether incompleteness is mandatory or merely
//! permitted. It performs no GL calls and holds no GL state of its own, so
//! it can be driven equally from a conformance test or from a runtime that
//! needs to predict `CheckFramebufferStatus` results.

#![deny(unsafe_code)]

mod attachment;
mod checker;
mod format;

pub use crate::attachment::{Attachment, AttachmentKind, AttachmentPoint, ImageInfo, ImageName};
pub use crate::checker::{
    primary_status, valid_statuses, CheckerState, CompletenessChecker, CompletenessRules,
    Es3Rules, Severity, Violation,
};
pub use crate::format::FormatFlags;
