use enumfield::EnumFields;

#[derive(EnumFields)]
pub struct Person {
    #[enum_field(values("Male", "Female"))]
    pub gender: String,

    #[enum_field(allow_nil)]
    pub title: Option<String>,
}

fn main() {}
