use std::sync::mpsc;

use crate::assets::decode::{PreparedImage, decode_input};
use crate::assets::mime::ImageInput;
use crate::export::encode::{EncodedImage, OutputFormat, encode_frame};
use crate::export::projector::project;
use crate::foundation::error::ClipframeResult;
use crate::input::gesture::{CropMessage, GestureTranslator, InputEvent};
use crate::layout::placement::fit_to_canvas;
use crate::layout::transform::Transform;
use crate::mask::generate::{MaskSurface, generate_mask};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::SourceImage;
use crate::render::pipeline::{ViewportSurface, render};
use crate::session::opts::{CropperOpts, DecodeOrder, ResolvedOpts};

/// Identifies one `incoming_image` submission; later submissions get larger tickets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecodeTicket(pub u64);

struct DecodeDone {
    ticket: DecodeTicket,
    result: ClipframeResult<PreparedImage>,
}

/// One crop widget: the viewport surface, its fixed mask, and the current image placement.
///
/// All state changes happen on the caller's thread. Decoding is the only background work; its
/// completions are applied by [`Cropper::poll`] or [`Cropper::wait_for_decodes`].
pub struct Cropper {
    opts: ResolvedOpts,
    mask: MaskSurface,
    surface: ViewportSurface,

    source: Option<SourceImage>,
    transform: Option<Transform>,
    painting_finished: bool,

    gestures: GestureTranslator,

    tx: mpsc::Sender<DecodeDone>,
    rx: mpsc::Receiver<DecodeDone>,
    next_ticket: u64,
    in_flight: usize,
}

impl std::fmt::Debug for Cropper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cropper")
            .field("opts", &self.opts)
            .field("source", &self.source)
            .field("transform", &self.transform)
            .field("painting_finished", &self.painting_finished)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Cropper {
    /// Validate `opts`, pre-render the mask and paint the empty viewport.
    ///
    /// Fails with [`crate::ClipframeError::MissingTarget`] or
    /// [`crate::ClipframeError::UnsupportedShape`] on bad configuration.
    pub fn new(opts: &CropperOpts) -> ClipframeResult<Self> {
        let opts = opts.resolve()?;
        let mask = generate_mask(opts.viewport, &opts.mask, opts.mask_color);
        let mut surface = ViewportSurface::new(opts.viewport);
        render(&mut surface, None, None, &mask);
        let (tx, rx) = mpsc::channel();

        tracing::debug!(
            viewport = ?opts.viewport,
            mask = ?opts.mask,
            "cropper constructed"
        );

        Ok(Self {
            gestures: GestureTranslator::new(opts.gestures),
            opts,
            mask,
            surface,
            source: None,
            transform: None,
            painting_finished: false,
            tx,
            rx,
            next_ticket: 0,
            in_flight: 0,
        })
    }

    /// `true` once the last render reflects the current state and an export would match it.
    pub fn is_painting_finished(&self) -> bool {
        self.painting_finished
    }

    /// Submit a new image. Absent inputs and MIME types outside the allow-list are ignored.
    ///
    /// Returns immediately; the decoded image replaces the current one when its completion is
    /// applied by [`Cropper::poll`] or [`Cropper::wait_for_decodes`].
    #[tracing::instrument(skip_all, fields(mime = tracing::field::Empty))]
    pub fn incoming_image(&mut self, input: Option<ImageInput>) -> Option<DecodeTicket> {
        let Some(input) = input else {
            tracing::debug!("no image supplied");
            return None;
        };
        tracing::Span::current().record("mime", input.mime());
        if !input.is_allowed() {
            tracing::debug!(mime = input.mime(), "image type not in allow-list");
            return None;
        }

        self.painting_finished = false;
        self.next_ticket += 1;
        let ticket = DecodeTicket(self.next_ticket);
        self.in_flight += 1;

        let tx = self.tx.clone();
        rayon::spawn(move || {
            let result = decode_input(&input);
            // The cropper may already be gone.
            let _ = tx.send(DecodeDone { ticket, result });
        });
        Some(ticket)
    }

    /// Apply every decode completion that has already arrived. Returns how many were taken.
    pub fn poll(&mut self) -> usize {
        let mut n = 0;
        while let Ok(done) = self.rx.try_recv() {
            self.finish_decode(done);
            n += 1;
        }
        n
    }

    /// Block until every submitted decode has completed and been applied.
    ///
    /// Every submission sends exactly one completion: `self.tx` keeps the channel open, and a
    /// panicking decode task aborts the process (rayon's default panic handling) rather than
    /// leaving `in_flight` stuck.
    pub fn wait_for_decodes(&mut self) {
        while self.in_flight > 0 {
            let Ok(done) = self.rx.recv() else {
                // Unreachable while `self.tx` is alive.
                break;
            };
            self.finish_decode(done);
        }
    }

    /// Decodes submitted but not yet applied.
    pub fn decodes_in_flight(&self) -> usize {
        self.in_flight
    }

    #[tracing::instrument(skip_all, fields(ticket = done.ticket.0))]
    fn finish_decode(&mut self, done: DecodeDone) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.opts.decode_order == DecodeOrder::LatestSubmission
            && done.ticket.0 != self.next_ticket
        {
            tracing::debug!(latest = self.next_ticket, "dropping superseded decode");
            return;
        }

        let source = match done.result.and_then(|p| SourceImage::from_prepared(&p)) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(error = %err, "image decode failed");
                return;
            }
        };

        let transform = fit_to_canvas(source.width(), source.height(), self.opts.viewport);
        tracing::debug!(
            width = source.width(),
            height = source.height(),
            ?transform,
            "image placed"
        );
        self.source = Some(source);
        self.transform = Some(transform);
        self.repaint();
    }

    /// Pan the image by `(dx, dy)` viewport pixels and repaint.
    pub fn moving(&mut self, dx: f64, dy: f64) {
        if let Some(t) = self.transform.as_mut() {
            t.moving(dx, dy);
        }
        self.repaint();
    }

    /// Grow (positive) or shrink (negative) the image by `delta` pixels per side around its
    /// center, then repaint.
    pub fn scaling(&mut self, delta: f64) {
        if let Some(t) = self.transform.as_mut() {
            match self.opts.min_image_size {
                Some(min) => t.scaling_with_floor(delta, min),
                None => t.scaling(delta),
            }
        }
        self.repaint();
    }

    fn repaint(&mut self) {
        render(
            &mut self.surface,
            self.source.as_ref(),
            self.transform,
            &self.mask,
        );
        self.painting_finished = true;
    }

    /// Route a message to the matching operation.
    pub fn apply(&mut self, msg: CropMessage) {
        match msg {
            CropMessage::Pan { dx, dy } => self.moving(dx, dy),
            CropMessage::Zoom { delta } => self.scaling(delta),
            CropMessage::NewImage(input) => {
                self.incoming_image(input);
            }
        }
    }

    /// Feed a raw UI event through the enabled gestures. Returns whether it changed anything.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match self.gestures.translate(event) {
            Some(msg) => {
                self.apply(msg);
                true
            }
            None => false,
        }
    }

    /// The crop region at the target's resolution, unencoded.
    pub fn export_frame(&self) -> FrameRGBA {
        project(
            self.source.as_ref(),
            self.transform,
            self.opts.viewport,
            &self.opts.mask,
        )
    }

    /// Encode the crop region. `format` is a MIME type; unknown or absent means PNG.
    #[tracing::instrument(skip(self))]
    pub fn export(
        &self,
        format: Option<&str>,
        quality: Option<f64>,
    ) -> ClipframeResult<EncodedImage> {
        if !self.painting_finished {
            tracing::debug!("exporting before painting finished; output may be stale");
        }
        let frame = self.export_frame();
        encode_frame(&frame, OutputFormat::from_mime(format), quality)
    }

    /// [`Cropper::export`] as a `data:` URL.
    ///
    /// `quality` only affects `image/jpeg`; `image/webp` is always encoded losslessly.
    pub fn to_data_url(
        &self,
        format: Option<&str>,
        quality: Option<f64>,
    ) -> ClipframeResult<String> {
        Ok(self.export(format, quality)?.to_data_url())
    }

    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }

    /// Native size of the current image.
    pub fn source_size(&self) -> Option<(u32, u32)> {
        self.source.as_ref().map(|s| (s.width(), s.height()))
    }

    /// What the viewport currently shows.
    pub fn viewport_frame(&self) -> FrameRGBA {
        self.surface.snapshot()
    }

    pub fn mask(&self) -> &MaskSurface {
        &self.mask
    }

    pub fn opts(&self) -> &ResolvedOpts {
        &self.opts
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/cropper.rs"]
mod tests;
