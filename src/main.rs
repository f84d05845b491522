use std::{
    thread,
    time::{Duration, Instant},
};

use est_animtex::prelude::*;

const TICK: Duration = Duration::from_millis(16);

fn main() {
    init_logging(LoggingConfig::default());

    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: est-animtex <animated image> [seconds]");
            std::process::exit(2);
        }
    };
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);

    let data = std::fs::read(&path).expect("Failed to read animation file");

    let gpu = create_gpu().build().expect("Failed to create GPU");
    log::info!(
        "adapter: {}",
        gpu.adapter_name().unwrap_or("unknown adapter")
    );

    let mut texture = gpu
        .create_animated_texture()
        .set_file_data(&data)
        .build()
        .expect("Failed to create animated texture");

    texture.set_smooth(true);
    texture.build_hardware_mipmaps();

    log::info!(
        "{}: {} frames, {}x{}, loop of {:?}",
        path,
        texture.frame_count(),
        texture.size().x,
        texture.size().y,
        texture.total_duration()
    );

    let deadline = Instant::now() + Duration::from_secs(seconds);
    while Instant::now() < deadline {
        if texture.update_animation() {
            log::info!(
                "frame {} -> texture {}",
                texture.current_frame(),
                texture.id()
            );
        }

        thread::sleep(TICK);
    }
}
