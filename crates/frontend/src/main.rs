mod api;
mod canvas;
mod components;
mod coords;
mod pages;

use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

const CSS: Asset = asset!("/assets/main.css");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: CSS }
        pages::map_page::MapPage {}
    }
}

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");
    launch(App);
}
