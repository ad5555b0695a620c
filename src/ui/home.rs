use iced::widget::{button, column, text};
use iced::{Alignment, Element};

use crate::route::Route;
use crate::Message;

pub fn view(product_count: usize) -> Element<'static, Message> {
    column![
        text("Product Catalog").size(40),
        text(format!("{} products registered this session.", product_count)).size(16),
        button("Register New Product")
            .on_press(Message::Navigate(Route::ProductForm))
            .padding(10),
        button("Browse Products")
            .on_press(Message::Navigate(Route::ProductList))
            .padding(10),
    ]
    .spacing(20)
    .padding(40)
    .align_x(Alignment::Center)
    .into()
}
