//! Image acquisition: camera shutter and gallery picker
//!
//! Neither path talks to the network. Both end with an [`ImageRef`] handed
//! to the prediction state machine, or with nothing when the user backs out.

use std::path::Path;

use plantrecog_core::prelude::*;
use plantrecog_core::{ImageRef, PermissionResource};
use plantrecog_service::{CameraDevice, CaptureOptions, CaptureSession, GalleryEntry, PickerOptions};

/// Where the next image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionSource {
    Camera,
    Gallery,
    /// A path given on the command line
    File,
}

impl AcquisitionSource {
    /// Permission the source needs, if any
    pub fn resource(&self) -> Option<PermissionResource> {
        match self {
            AcquisitionSource::Camera => Some(PermissionResource::Camera),
            AcquisitionSource::Gallery => Some(PermissionResource::MediaLibrary),
            AcquisitionSource::File => None,
        }
    }
}

/// Single-selection picker over the gallery directory
#[derive(Debug, Clone)]
pub struct GalleryPickerState {
    pub entries: Vec<GalleryEntry>,
    pub selected: usize,
    /// Showing the crop confirmation for the selected entry
    pub confirming: bool,
    pub options: PickerOptions,
}

/// What a picker key press led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerStep {
    /// Still picking
    Pending,
    Picked(GalleryEntry),
}

impl GalleryPickerState {
    pub fn new(entries: Vec<GalleryEntry>, options: PickerOptions) -> Self {
        Self {
            entries,
            selected: 0,
            confirming: false,
            options,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected_entry(&self) -> Option<&GalleryEntry> {
        self.entries.get(self.selected)
    }

    pub fn select_previous(&mut self) {
        if self.confirming || self.entries.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.entries.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn select_next(&mut self) {
        if self.confirming || self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.entries.len();
    }

    pub fn select_first(&mut self) {
        if !self.confirming {
            self.selected = 0;
        }
    }

    pub fn select_last(&mut self) {
        if !self.confirming {
            self.selected = self.entries.len().saturating_sub(1);
        }
    }

    /// Enter on the list opens the crop confirmation; Enter there picks
    pub fn accept(&mut self) -> PickerStep {
        let Some(entry) = self.selected_entry().cloned() else {
            return PickerStep::Pending;
        };

        if self.options.allows_editing && !self.confirming {
            self.confirming = true;
            return PickerStep::Pending;
        }

        PickerStep::Picked(entry)
    }

    /// Leave the crop confirmation. Returns `false` when already on the list.
    pub fn back(&mut self) -> bool {
        std::mem::replace(&mut self.confirming, false)
    }
}

/// One shutter capture at the configured quality, square-cropped
pub async fn capture_via_camera<C: CameraDevice>(
    session: &CaptureSession<C>,
    options: CaptureOptions,
) -> Result<ImageRef> {
    let image = session.capture(options).await?;
    info!("Captured {}", image);
    Ok(image)
}

/// Copy a picked file into the session, square-cropped
pub async fn import_picked<C: CameraDevice>(
    session: &CaptureSession<C>,
    source: &Path,
    options: &PickerOptions,
) -> Result<ImageRef> {
    let image = session.import(source, options.quality).await?;
    info!("Imported {:?} as {}", source, image);
    Ok(image)
}
