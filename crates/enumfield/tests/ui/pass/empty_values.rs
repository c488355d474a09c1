use enumfield::{EnumFields, core::model::ModelSchema};

#[derive(Default, EnumFields)]
pub struct Gadget {
    #[enum_field(values(), allow_nil)]
    pub kind: Option<String>,
}

fn main() {
    assert!(Gadget::KINDS.is_empty());

    let schema = ModelSchema::build::<Gadget>().unwrap();
    assert!(schema.validate(&Gadget::default()).is_ok());
    assert!(
        schema
            .validate(&Gadget {
                kind: Some("anything".to_string()),
            })
            .is_err()
    );
}
