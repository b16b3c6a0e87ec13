pub mod auth;
pub mod collection;
pub mod faq;
pub mod photo_carousel;
pub mod service;
pub mod site_config;
pub mod site_document;
pub mod specialty;
pub mod testimonial;

pub use auth::*;
pub use faq::FaqItem;
pub use photo_carousel::PhotoCarousel;
pub use service::Service;
pub use specialty::Specialty;
pub use testimonial::Testimonial;
