/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Exercises the per-attachment validity gate, which consumes the format
//! capability flags.

use euclid::default::Size2D;
use fbo_completeness::{
    Attachment, AttachmentPoint, CompletenessChecker, FormatFlags, ImageInfo, ImageName, Severity,
};
use sparkle::gl;

fn gate(point: AttachmentPoint, attachment: &Attachment, image: &ImageInfo) -> usize {
    let mut checker = CompletenessChecker::es3();
    checker.check_attachment_completeness(point, attachment, image);
    assert!(checker
        .violations()
        .iter()
        .all(|v| v.severity == Severity::Mandatory &&
            v.reason == gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT));
    checker.violations().len()
}

#[test]
fn well_formed_attachment_passes_the_gate() {
    let image = ImageInfo::renderbuffer(
        Size2D::new(32, 32),
        0,
        FormatFlags::COLOR_RENDERABLE | FormatFlags::RENDERBUFFER_VALID,
    );
    let attachment = Attachment::renderbuffer(ImageName(1));
    assert_eq!(gate(AttachmentPoint::Color(0), &attachment, &image), 0);
}

#[test]
fn zero_extent_image_is_attachment_incomplete() {
    let image = ImageInfo::renderbuffer(
        Size2D::new(0, 32),
        0,
        FormatFlags::COLOR_RENDERABLE | FormatFlags::RENDERBUFFER_VALID,
    );
    let attachment = Attachment::renderbuffer(ImageName(1));
    assert_eq!(gate(AttachmentPoint::Color(0), &attachment, &image), 1);
}

#[test]
fn layer_outside_the_image_is_attachment_incomplete() {
    let image = ImageInfo::layered_texture(
        Size2D::new(32, 32),
        4,
        FormatFlags::COLOR_RENDERABLE | FormatFlags::TEXTURE_VALID,
    );
    let in_range = Attachment::texture_layer(ImageName(1), 3);
    assert_eq!(gate(AttachmentPoint::Color(0), &in_range, &image), 0);
    let out_of_range = Attachment::texture_layer(ImageName(1), 4);
    assert_eq!(gate(AttachmentPoint::Color(0), &out_of_range, &image), 1);
    let negative = Attachment::texture_layer(ImageName(1), -1);
    assert_eq!(gate(AttachmentPoint::Color(0), &negative, &image), 1);
}

#[test]
fn non_renderable_format_at_point_is_attachment_incomplete() {
    let color_only = ImageInfo::renderbuffer(
        Size2D::new(32, 32),
        0,
        FormatFlags::COLOR_RENDERABLE | FormatFlags::RENDERBUFFER_VALID,
    );
    let attachment = Attachment::renderbuffer(ImageName(1));
    assert_eq!(gate(AttachmentPoint::Depth, &attachment, &color_only), 1);
}

#[test]
fn depth_stencil_point_needs_both_renderability_bits() {
    let depth_only = ImageInfo::renderbuffer(
        Size2D::new(32, 32),
        0,
        FormatFlags::DEPTH_RENDERABLE | FormatFlags::RENDERBUFFER_VALID,
    );
    let attachment = Attachment::renderbuffer(ImageName(1));
    assert_eq!(gate(AttachmentPoint::DepthStencil, &attachment, &depth_only), 1);

    let both = ImageInfo::renderbuffer(
        Size2D::new(32, 32),
        0,
        FormatFlags::DEPTH_RENDERABLE |
            FormatFlags::STENCIL_RENDERABLE |
            FormatFlags::RENDERBUFFER_VALID,
    );
    assert_eq!(gate(AttachmentPoint::DepthStencil, &attachment, &both), 0);
}

#[test]
fn storage_kind_must_match_how_the_image_is_attached() {
    // A texture-only format attached as a renderbuffer.
    let tex_format = ImageInfo::renderbuffer(
        Size2D::new(32, 32),
        0,
        FormatFlags::COLOR_RENDERABLE | FormatFlags::TEXTURE_VALID,
    );
    let as_rb = Attachment::renderbuffer(ImageName(1));
    assert_eq!(gate(AttachmentPoint::Color(0), &as_rb, &tex_format), 1);
}

#[test]
fn gate_failures_accumulate_independently() {
    // Zero extent, bad layer, wrong renderability and wrong storage kind,
    // all at once.
    let image = ImageInfo::layered_texture(Size2D::new(0, 0), 2, FormatFlags::COLOR_RENDERABLE);
    let attachment = Attachment::texture_layer(ImageName(1), 2);
    assert_eq!(gate(AttachmentPoint::Depth, &attachment, &image), 4);
}

#[test]
fn flag_unions_behave_as_capability_sets() {
    let flags = FormatFlags::COLOR_RENDERABLE | FormatFlags::RENDERBUFFER_VALID;
    assert!(flags.contains(FormatFlags::COLOR_RENDERABLE));
    assert!(!flags.contains(FormatFlags::DEPTH_RENDERABLE));
    assert!(!FormatFlags::empty().contains(FormatFlags::TEXTURE_VALID));
}
