// File: src/interpreter/types.rs
//
// Registry of user-declared struct and enum shapes.
//
// Declarations register a descriptor once; instantiation and pattern
// matching consult the registry by name. The registry is populated
// incrementally while a program runs and entries are never removed.

use ahash::AHashMap;
use std::rc::Rc;

/// Shape of a declared struct: field names in declaration order.
/// Order is significant for display, not for equality.
#[derive(Debug)]
pub struct StructDescriptor {
    pub name: String,
    pub fields: Vec<String>,
}

/// One declared enum variant: tag plus expected payload arity
#[derive(Debug)]
pub struct VariantDescriptor {
    pub name: String,
    pub arity: usize,
}

/// Shape of a declared enum: ordered variant tags
#[derive(Debug)]
pub struct EnumDescriptor {
    pub name: String,
    pub variants: Vec<VariantDescriptor>,
}

impl EnumDescriptor {
    pub fn variant(&self, name: &str) -> Option<&VariantDescriptor> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// Append-only table of declared type shapes
#[derive(Debug, Default)]
pub struct TypeRegistry {
    structs: AHashMap<String, Rc<StructDescriptor>>,
    enums: AHashMap<String, Rc<EnumDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a struct shape. Fails when the name is already taken by
    /// any declared type.
    pub fn register_struct(&mut self, descriptor: StructDescriptor) -> Result<(), String> {
        if self.is_declared(&descriptor.name) {
            return Err(format!("type '{}' is already defined", descriptor.name));
        }
        self.structs.insert(descriptor.name.clone(), Rc::new(descriptor));
        Ok(())
    }

    /// Register an enum shape. Fails when the name is already taken.
    pub fn register_enum(&mut self, descriptor: EnumDescriptor) -> Result<(), String> {
        if self.is_declared(&descriptor.name) {
            return Err(format!("type '{}' is already defined", descriptor.name));
        }
        self.enums.insert(descriptor.name.clone(), Rc::new(descriptor));
        Ok(())
    }

    pub fn struct_descriptor(&self, name: &str) -> Option<Rc<StructDescriptor>> {
        self.structs.get(name).map(Rc::clone)
    }

    pub fn enum_descriptor(&self, name: &str) -> Option<Rc<EnumDescriptor>> {
        self.enums.get(name).map(Rc::clone)
    }

    fn is_declared(&self, name: &str) -> bool {
        self.structs.contains_key(name) || self.enums.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_registration_and_lookup() {
        let mut registry = TypeRegistry::new();
        registry
            .register_struct(StructDescriptor {
                name: "Point".into(),
                fields: vec!["x".into(), "y".into()],
            })
            .unwrap();

        let descriptor = registry.struct_descriptor("Point").unwrap();
        assert_eq!(descriptor.fields, vec!["x".to_string(), "y".to_string()]);
        assert!(registry.struct_descriptor("Missing").is_none());
    }

    #[test]
    fn test_redeclaration_is_rejected_across_kinds() {
        let mut registry = TypeRegistry::new();
        registry
            .register_struct(StructDescriptor { name: "Shape".into(), fields: vec![] })
            .unwrap();

        let err = registry
            .register_enum(EnumDescriptor { name: "Shape".into(), variants: vec![] })
            .unwrap_err();
        assert!(err.contains("already defined"));
    }

    #[test]
    fn test_enum_variant_arity_lookup() {
        let mut registry = TypeRegistry::new();
        registry
            .register_enum(EnumDescriptor {
                name: "Shape".into(),
                variants: vec![
                    VariantDescriptor { name: "Dot".into(), arity: 0 },
                    VariantDescriptor { name: "Circle".into(), arity: 1 },
                ],
            })
            .unwrap();

        let descriptor = registry.enum_descriptor("Shape").unwrap();
        assert_eq!(descriptor.variant("Circle").unwrap().arity, 1);
        assert!(descriptor.variant("Square").is_none());
    }
}
