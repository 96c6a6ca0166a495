fn main() {
    if let Err(e) = ssr_tracker_lib::run() {
        eprintln!("错误: {}", e);
        std::process::exit(1);
    }
}
