/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use log::trace;
use serde::{Deserialize, Serialize};
use sparkle::gl;
use sparkle::gl::types::{GLenum, GLsizei};

use crate::attachment::{Attachment, AttachmentKind, AttachmentPoint, ImageInfo, ImageName};
use crate::format::FormatFlags;

/// Whether a recorded violation forces incompleteness or merely permits it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Severity {
    /// The combination is unconditionally incomplete.
    Mandatory,
    /// A conforming implementation may report either this status or
    /// `FRAMEBUFFER_COMPLETE`. Drivers are allowed to round a requested
    /// sample count up to a supported one, for example, so two attachments
    /// with different nominal counts may still end up matching.
    Potential,
}

/// One completeness rule violation, in the order it was discovered.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Violation {
    pub severity: Severity,
    /// A `FRAMEBUFFER_*` status from the GL enum space.
    pub reason: GLenum,
}

/// Running state of a single completeness evaluation. Fresh per evaluation;
/// visiting an attachment can only append violations, never retract ones
/// recorded earlier.
#[derive(Debug, Default)]
pub struct CheckerState {
    /// Sample-count consensus across the attachments seen so far. `None`
    /// until the first attachment pins it; never rewritten afterwards
    /// (a diverging count is the violation, not something to reconcile).
    num_samples: Option<GLsizei>,
    /// The image bound to whichever of depth/stencil was seen first, with
    /// how it was attached.
    depth_stencil: Option<(ImageName, AttachmentKind)>,
    violations: Vec<Violation>,
}

impl CheckerState {
    pub fn add_violation(&mut self, reason: GLenum) {
        trace!("mandatory framebuffer violation: {:#06x}", reason);
        self.violations.push(Violation {
            severity: Severity::Mandatory,
            reason,
        });
    }

    pub fn add_potential_violation(&mut self, reason: GLenum) {
        trace!("potential framebuffer violation: {:#06x}", reason);
        self.violations.push(Violation {
            severity: Severity::Potential,
            reason,
        });
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    fn clear(&mut self) {
        self.num_samples = None;
        self.depth_stencil = None;
        self.violations.clear();
    }

    /// From the GLES 3.0 spec, section 4.4.4:
    ///
    ///     "The value of RENDERBUFFER_SAMPLES is the same for all attached
    ///      renderbuffers; the value of TEXTURE_SAMPLES is the same for all
    ///      attached textures; and, if the attached images are a mix of
    ///      renderbuffers and textures, the value of RENDERBUFFER_SAMPLES
    ///      matches the value of TEXTURE_SAMPLES."
    ///
    /// Texture images report zero samples here, so mixing a multisampled
    /// renderbuffer with any texture is always incomplete. Two nonzero but
    /// unequal counts are only potentially incomplete, since the driver may
    /// have rounded both requests up to the same supported count.
    pub fn check_sample_counts(&mut self, image: &ImageInfo) {
        let samples = image.num_samples();
        let existing = match self.num_samples {
            Some(existing) => existing,
            None => {
                // A single data point cannot be inconsistent.
                self.num_samples = Some(samples);
                return;
            },
        };
        if (existing == 0) != (samples == 0) {
            self.add_violation(gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE);
        }
        if existing != samples {
            self.add_potential_violation(gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE);
        }
    }

    /// From the GLES 3.0 spec, section 4.4.4:
    ///
    ///     "Depth and stencil attachments, if present, are the same image."
    ///
    /// Applies to the separate DEPTH and STENCIL points only; a combined
    /// DEPTH_STENCIL binding trivially satisfies it.
    pub fn check_depth_stencil_pairing(&mut self, point: AttachmentPoint, attachment: &Attachment) {
        match point {
            AttachmentPoint::Depth | AttachmentPoint::Stencil => {},
            _ => return,
        }
        match self.depth_stencil {
            None => self.depth_stencil = Some((attachment.image, attachment.kind)),
            Some((image, kind)) => {
                if image != attachment.image || kind != attachment.kind {
                    self.add_violation(gl::FRAMEBUFFER_UNSUPPORTED);
                }
            },
        }
    }
}

/// A versioned set of completeness rules.
///
/// Rule sets for later API versions compose by delegation: run the base
/// rules (the `check_*` methods on [`CheckerState`]), then append their own
/// findings to the same violation list. Each base rule reads only the piece
/// of running state it owns, so additions cannot disturb its bookkeeping.
pub trait CompletenessRules {
    fn check(
        &self,
        state: &mut CheckerState,
        point: AttachmentPoint,
        attachment: &Attachment,
        image: &ImageInfo,
    );
}

/// The OpenGL ES 3.0 rules: sample-count consistency and depth/stencil
/// image co-identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Es3Rules;

impl CompletenessRules for Es3Rules {
    fn check(
        &self,
        state: &mut CheckerState,
        point: AttachmentPoint,
        attachment: &Attachment,
        image: &ImageInfo,
    ) {
        state.check_sample_counts(image);
        state.check_depth_stencil_pairing(point, attachment);
    }
}

/// Evaluates framebuffer completeness over a sequence of bound attachments.
///
/// One instance serves one evaluation at a time: call [`check`] once per
/// bound attachment point, in any order, then read [`violations`]. Call
/// [`reset`] (or use [`validate`], which does) before reusing the instance
/// for another framebuffer; skipping that leaks the previous evaluation's
/// running state into the next one.
///
/// [`check`]: CompletenessChecker::check
/// [`reset`]: CompletenessChecker::reset
/// [`validate`]: CompletenessChecker::validate
/// [`violations`]: CompletenessChecker::violations
#[derive(Debug)]
pub struct CompletenessChecker<R: CompletenessRules> {
    rules: R,
    state: CheckerState,
}

impl CompletenessChecker<Es3Rules> {
    pub fn es3() -> Self {
        CompletenessChecker::new(Es3Rules)
    }
}

impl<R: CompletenessRules> CompletenessChecker<R> {
    pub fn new(rules: R) -> Self {
        CompletenessChecker {
            rules,
            state: CheckerState::default(),
        }
    }

    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// Processes one bound attachment: applies the rule set, appending any
    /// violations it finds and updating the running state. The image
    /// descriptor is borrowed for the call only.
    pub fn check(&mut self, point: AttachmentPoint, attachment: &Attachment, image: &ImageInfo) {
        self.rules.check(&mut self.state, point, attachment, image);
    }

    /// Per-attachment validity gate, independent of the versioned rules:
    /// attachment completeness per GLES 3.0 section 4.4.4. The image must
    /// have nonzero extent, a layered attachment must select a layer the
    /// image actually has, and the format must be renderable at this point
    /// and usable for the way it is attached. Each failing condition
    /// appends its own mandatory `FRAMEBUFFER_INCOMPLETE_ATTACHMENT`.
    pub fn check_attachment_completeness(
        &mut self,
        point: AttachmentPoint,
        attachment: &Attachment,
        image: &ImageInfo,
    ) {
        if image.size().width <= 0 || image.size().height <= 0 {
            self.state
                .add_violation(gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT);
        }
        if attachment.kind == AttachmentKind::TextureLayered &&
            (attachment.layer < 0 || attachment.layer >= image.layers())
        {
            self.state
                .add_violation(gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT);
        }
        if !image.flags().contains(point.required_renderable()) {
            self.state
                .add_violation(gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT);
        }
        let storage = match attachment.kind {
            AttachmentKind::Renderbuffer => FormatFlags::RENDERBUFFER_VALID,
            AttachmentKind::Texture | AttachmentKind::TextureLayered => FormatFlags::TEXTURE_VALID,
        };
        if !image.flags().contains(storage) {
            self.state
                .add_violation(gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT);
        }
    }

    /// Runs one full evaluation over attachments in binding order: resets,
    /// then applies the validity gate and the rule set to each entry.
    /// Returns the accumulated violation list.
    pub fn validate<'a, I>(&mut self, attachments: I) -> &[Violation]
    where
        I: IntoIterator<Item = (AttachmentPoint, &'a Attachment, &'a ImageInfo)>,
    {
        self.reset();
        for (point, attachment, image) in attachments {
            self.check_attachment_completeness(point, attachment, image);
            self.check(point, attachment, image);
        }
        self.violations()
    }

    /// The ordered violation read-out for the current evaluation.
    pub fn violations(&self) -> &[Violation] {
        self.state.violations()
    }
}

/// The status a driver must report for this violation list when the caller
/// wants a single answer: the first mandatory violation's reason, or
/// `FRAMEBUFFER_COMPLETE` when nothing forces incompleteness. Potential
/// violations do not affect this reduction; use [`valid_statuses`] to accept
/// every conforming outcome.
pub fn primary_status(violations: &[Violation]) -> GLenum {
    violations
        .iter()
        .find(|v| v.severity == Severity::Mandatory)
        .map_or(gl::FRAMEBUFFER_COMPLETE, |v| v.reason)
}

/// Every status a conforming implementation may report for this violation
/// list: the deduplicated mandatory reasons if any exist (GL reports an
/// arbitrary one of them), otherwise `FRAMEBUFFER_COMPLETE` plus every
/// potential reason. This is the reduction a conformance test wants.
pub fn valid_statuses(violations: &[Violation]) -> Vec<GLenum> {
    fn push_unique(out: &mut Vec<GLenum>, status: GLenum) {
        if !out.contains(&status) {
            out.push(status);
        }
    }

    let mut statuses = Vec::new();
    if violations.iter().any(|v| v.severity == Severity::Mandatory) {
        for violation in violations {
            if violation.severity == Severity::Mandatory {
                push_unique(&mut statuses, violation.reason);
            }
        }
        return statuses;
    }

    push_unique(&mut statuses, gl::FRAMEBUFFER_COMPLETE);
    for violation in violations {
        push_unique(&mut statuses, violation.reason);
    }
    statuses
}
