pub mod account;
pub mod brand;
pub mod content;
pub mod dashboard;
pub mod phone;
pub mod profile;
pub mod role;

pub use account::{Account, AccountIdentity, AccountSummary, NewAccount};
pub use brand::{Brand, NewBrand};
pub use content::{Comment, CommentWithAuthor, NewComment, NewReview, PhoneReview, Review, ReviewListing};
pub use dashboard::{CountEntry, DashboardCounts};
pub use phone::{NewPhone, NewSpecification, Phone, PhoneSummary, Specification};
pub use profile::{NewProfile, Profile};
pub use role::Role;
