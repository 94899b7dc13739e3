pub mod descent;
pub mod trajectory;
