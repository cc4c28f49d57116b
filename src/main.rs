fn main() {
    window_position_saver_lib::run()
}
