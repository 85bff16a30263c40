pub mod current_user;
pub mod if_match;
pub mod room_id;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use if_match::ExpectedVersion;
pub use room_id::RoomId;
pub use validated_json::ValidatedJson;
