pub mod ports;
pub mod analytics_use_case;
pub mod socials_use_case;
