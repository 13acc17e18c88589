pub mod ffmpeg;
pub mod gallery;
pub mod record;
pub mod sink;
pub mod still;

pub use ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use gallery::{GalleryOptions, gallery_label, parse_gallery_identifier, render_gallery};
pub use record::{Keyframe, RecordConfig, record_intro, record_timeline, record_travel};
pub use sink::{FrameSink, InMemorySink, SinkConfig};
pub use still::{StillFormat, export_file_name, save_frame};
