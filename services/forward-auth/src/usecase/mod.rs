pub mod gate;
pub mod logout;
pub mod request_code;
pub mod verify_code;
