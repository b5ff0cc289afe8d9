use crate::prelude::{Database, IbResult};

pub fn from_ron(data: &str) -> IbResult<Database> {
    Ok(ron::from_str(data)?)
}

pub fn from_json(data: &str) -> IbResult<Database> {
    Ok(serde_json::from_str(data)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_ron_export() {
        let db = from_ron(
            r#"(
                image_base: 0x400000,
                functions: [
                    (name: "main", address: 0x401000),
                    (name: "helper", address: 0x402000),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(0x400000, db.image_base);
        assert_eq!(2, db.functions.len());
        assert_eq!("main", db.functions[0].name);
        assert_eq!(0x401000, db.functions[0].address);
    }

    #[test]
    fn reads_json_export() {
        let db = from_json(
            r#"{
                "image_base": 4194304,
                "functions": [{"name": "main", "address": 4198400}]
            }"#,
        )
        .unwrap();

        assert_eq!(0x400000, db.image_base);
        assert_eq!(0x401000, db.functions[0].address);
    }

    #[test]
    fn rejects_corrupt_export() {
        assert!(from_ron("(image_base: )").is_err());
        assert!(from_json("{").is_err());
    }
}
