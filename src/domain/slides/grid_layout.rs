use error_stack::report;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridLayoutError {
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
    #[error("{field} must be in (0, 1], got {value}")]
    InvalidRatio { field: &'static str, value: f64 },
    #[error("a {rows}x{cols} grid has more cells than can be counted")]
    TooManyCells { rows: u32, cols: u32 },
}

/// How videos should be arranged on each slide.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    /// Caps the videos per slide below `rows * cols`
    pub limit: Option<u32>,
    /// Largest fraction of the slide width a single video may take
    pub width_ratio: f64,
    pub height_ratio: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            limit: Some(9),
            width_ratio: 0.3,
            height_ratio: 0.3,
        }
    }
}

impl GridSpec {
    pub fn validate(&self) -> error_stack::Result<(), GridLayoutError> {
        for (field, value) in [("rows", self.rows), ("cols", self.cols)] {
            if value == 0 {
                return Err(report!(GridLayoutError::ZeroCount { field }));
            }
        }
        if self.limit == Some(0) {
            return Err(report!(GridLayoutError::ZeroCount { field: "limit" }));
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(report!(GridLayoutError::TooManyCells {
                rows: self.rows,
                cols: self.cols
            }));
        }
        for (field, value) in [
            ("width ratio", self.width_ratio),
            ("height ratio", self.height_ratio),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(report!(GridLayoutError::InvalidRatio { field, value }));
            }
        }
        Ok(())
    }

    pub fn per_slide(&self) -> u32 {
        let capacity = self.rows.saturating_mul(self.cols);
        match self.limit {
            Some(limit) => capacity.min(limit),
            None => capacity,
        }
    }

    pub fn slide_count(&self, video_count: usize) -> usize {
        video_count.div_ceil(self.per_slide() as usize)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
    /// Unit reported by the presentation, e.g. `EMU`
    pub unit: String,
}

/// Position and size of one video, in page units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoPlacement {
    pub slide_index: usize,
    pub frame: CellFrame,
}

/// Grid geometry resolved against a concrete page size.
///
/// The video block is centered on the page; videos fill it row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    per_slide: u32,
    cols: u32,
    video_width: f64,
    video_height: f64,
    block_x: f64,
    block_y: f64,
}

impl GridLayout {
    pub fn new(spec: &GridSpec, page: &PageSize) -> error_stack::Result<Self, GridLayoutError> {
        spec.validate()?;

        let video_width = (1.0 / spec.cols as f64).min(spec.width_ratio) * page.width;
        let video_height = (1.0 / spec.rows as f64).min(spec.height_ratio) * page.height;

        Ok(Self {
            per_slide: spec.per_slide(),
            cols: spec.cols,
            video_width,
            video_height,
            block_x: ((page.width - video_width * spec.cols as f64) / 2.0).max(0.0),
            block_y: ((page.height - video_height * spec.rows as f64) / 2.0).max(0.0),
        })
    }

    pub fn per_slide(&self) -> u32 {
        self.per_slide
    }

    pub fn placement(&self, index: usize) -> VideoPlacement {
        let per_slide = self.per_slide as usize;
        let cols = self.cols as usize;
        let slot = index % per_slide;

        VideoPlacement {
            slide_index: index / per_slide,
            frame: CellFrame {
                x: (slot % cols) as f64 * self.video_width + self.block_x,
                y: (slot / cols) as f64 * self.video_height + self.block_y,
                width: self.video_width,
                height: self.video_height,
            },
        }
    }
}
