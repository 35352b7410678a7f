fn main() {
    std::process::exit(audio_devices_lib::run())
}
