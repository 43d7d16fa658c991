fn main() {
    elz::cli::run();
}
