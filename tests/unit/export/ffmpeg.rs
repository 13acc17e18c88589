use super::*;
use crate::foundation::core::Fps;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn config_validation_catches_bad_sizes() {
    assert!(validate_sink_config(&cfg(0, 10)).is_err());
    assert!(validate_sink_config(&cfg(11, 10)).is_err());
    assert!(validate_sink_config(&cfg(1080, 1350)).is_ok());
}

#[test]
fn encoder_args_put_input_rate_before_input() {
    let args = encoder_args(&FfmpegSinkOpts::new("out/travel.mp4"), &cfg(252, 252));
    let args: Vec<String> = args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    assert_eq!(args[0], "-y");
    let size = args.iter().position(|a| a == "-s").unwrap();
    assert_eq!(args[size + 1], "252x252");
    let rate = args.iter().position(|a| a == "-r").unwrap();
    let input = args.iter().position(|a| a == "-i").unwrap();
    assert!(rate < input);
    assert_eq!(args[rate + 1], "30/1");
    assert_eq!(args.last().map(String::as_str), Some("out/travel.mp4"));
}

#[test]
fn encoder_args_refuse_overwrite_when_asked() {
    let opts = FfmpegSinkOpts {
        out_path: "keep.mp4".into(),
        overwrite: false,
    };
    let args = encoder_args(&opts, &cfg(2, 2));
    assert_eq!(args[0], "-n");
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(0, &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn existing_output_is_kept_without_overwrite() {
    let path = std::env::temp_dir().join(format!("syntropy_ffmpeg_keep_{}.mp4", std::process::id()));
    std::fs::write(&path, b"keep").unwrap();
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: path.clone(),
        overwrite: false,
    });
    assert!(sink.begin(cfg(4, 4)).is_err());
    assert_eq!(std::fs::read(&path).unwrap(), b"keep");
    let _ = std::fs::remove_file(&path);
}
