pub mod customer_routes;
pub mod health;
mod multipart_form;
