use std::process;

fn main() {
    process::exit(pic_sim::app::run());
}
