use enumfield::EnumFields;

#[derive(EnumFields)]
pub struct Person {
    pub name: String,
}

fn main() {}
