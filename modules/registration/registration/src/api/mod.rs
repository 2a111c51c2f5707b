pub mod view;

pub use view::{FieldView, FormView, InputKind, StatusView, SubmitView};
