//! Where catalogs come from: the one compiled into the binary, or a file

use tracing::{debug, info};

use crate::lib::{
    error::{Error, Record},
    offering::Catalog,
    parse,
};

const BUILTIN_PATH: &str = "data/voyages.cat";
const BUILTIN: &str = include_str!("../../data/voyages.cat");

/// The catalog shipped with the binary
pub fn builtin_catalog(errs: &mut Record) -> Option<Catalog> {
    let catalog = parse::catalog(BUILTIN_PATH, errs, BUILTIN)?;
    debug!(offerings = catalog.len(), "builtin catalog loaded");
    Some(catalog)
}

/// Read a catalog from `filename`, reporting problems in `errs`
pub fn read_catalog(filename: &str, errs: &mut Record) -> Option<Catalog> {
    let contents = match std::fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(e) => {
            Error::new("File not found")
                .with_text(format!("Could not read '{}': {}", filename, e))
                .with_hint("check the path given to --catalog")
                .register(errs);
            return None;
        }
    };
    let catalog = parse::catalog(filename, errs, &contents)?;
    info!(filename, offerings = catalog.len(), "catalog loaded");
    Some(catalog)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_is_clean() {
        let mut errs = Record::new();
        let catalog = builtin_catalog(&mut errs).unwrap();
        assert!(errs.is_empty(), "{}", errs);
        let ids = catalog.iter().map(|o| o.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["cotignac", "sainte-baume", "laus", "ventimiglia"]);
        assert_eq!(catalog.get("ventimiglia").unwrap().country, "Italie");
    }

    #[test]
    fn missing_file() {
        let mut errs = Record::new();
        assert!(read_catalog("/nonexistent/voyages.cat", &mut errs).is_none());
        assert!(errs.is_fatal());
    }
}
