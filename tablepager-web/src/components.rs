pub mod pagination_bar;
