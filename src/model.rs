// src/model.rs
// Language-neutral result of reading one documentation page.

use crate::entity::EntityRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Class,
    Interface,
    Enum,
}

impl Kind {
    /// Classify a page title ("Class String", "Interface List<E>") by its first word.
    pub fn from_title(title: &str) -> Option<Kind> {
        match title.split_whitespace().next()? {
            "Class" => Some(Kind::Class),
            "Interface" => Some(Kind::Interface),
            "Enum" => Some(Kind::Enum),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Kind::Class => "class",
            Kind::Interface => "interface",
            Kind::Enum => "enum",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    /// Classified but never stored: private members are dropped before a record exists.
    Private,
}

/// A linked type, in both normalizations the emitter needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// `java.lang.Object`, for human-readable annotations
    pub dotted: String,
    /// `java_lang_Object`, for generated identifiers
    pub ident: String,
}

/// One retained constructor, method or field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationRecord {
    pub signature: String,
    pub visibility: Visibility,
    pub is_abstract_or_interface_member: bool,
    pub documentation: String,
}

impl DeclarationRecord {
    pub fn has_body(&self) -> bool {
        !self.is_abstract_or_interface_member && self.signature.contains('(')
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeModel {
    pub entity: EntityRef,
    pub kind: Kind,
    /// Class modifiers in declaration order, e.g. ["public", "final"]
    pub modifiers: Vec<String>,
    pub generics: Vec<String>,
    /// Direct parent only
    pub super_type: Option<TypeRef>,
    /// Document order, no duplicates
    pub implemented: Vec<TypeRef>,
    pub constructors: Vec<DeclarationRecord>,
    pub methods: Vec<DeclarationRecord>,
    pub fields: Vec<DeclarationRecord>,
}

impl TypeModel {
    pub fn new(entity: EntityRef, kind: Kind) -> Self {
        Self {
            entity,
            kind,
            modifiers: Vec::new(),
            generics: Vec::new(),
            super_type: None,
            implemented: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn member_count(&self) -> usize {
        self.constructors.len() + self.methods.len() + self.fields.len()
    }

    /// Add a contract unless an equal dotted name is already present.
    pub fn add_contract(&mut self, t: TypeRef) {
        if !self.implemented.iter().any(|x| x.dotted == t.dotted) {
            self.implemented.push(t);
        }
    }
}

/// What reading one page produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Translation {
    Class(TypeModel),
    /// Recognized kind with no emitter yet (Interface, Enum).
    NotImplemented(Kind),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_title_first_word() {
        assert_eq!(Kind::from_title("Class Foo"), Some(Kind::Class));
        assert_eq!(Kind::from_title("Interface X"), Some(Kind::Interface));
        assert_eq!(Kind::from_title("  Enum Y"), Some(Kind::Enum));
        assert_eq!(Kind::from_title("Annotation Type Z"), None);
        assert_eq!(Kind::from_title(""), None);
    }

    #[test]
    fn contracts_deduplicate_on_dotted_name() {
        let e = EntityRef::new("a.B", "u").unwrap();
        let mut m = TypeModel::new(e, Kind::Class);
        let t = TypeRef { dotted: s!("java.io.Serializable"), ident: s!("java_io_Serializable") };
        m.add_contract(t.clone());
        m.add_contract(t);
        assert_eq!(m.implemented.len(), 1);
    }

    #[test]
    fn abstract_methods_and_fields_have_no_body() {
        let mut d = DeclarationRecord {
            signature: s!("public int size()"),
            visibility: Visibility::Public,
            is_abstract_or_interface_member: false,
            documentation: s!(),
        };
        assert!(d.has_body());
        d.is_abstract_or_interface_member = true;
        assert!(!d.has_body());
        d.signature = s!("public static final int MAX");
        d.is_abstract_or_interface_member = false;
        assert!(!d.has_body());
    }
}
