pub mod forms;

pub use forms::{FieldErrors, JoinForm, LeagueForm, LoginForm, RegisterForm};
