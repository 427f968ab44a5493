fn main() {
    #[cfg(feature = "logging")]
    env_logger::init();

    let book = chess_engine::book::OpeningBook::load("book.txt").ok();
    chess_engine::shell::run(book);
}
