fn main() {
    zoom_timeline_lib::run()
}
