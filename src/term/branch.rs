use std::fmt::Display;

use crate::{GoError, GoResult};

/// The three disjoint sub-ontologies of the Gene Ontology
///
/// Every term belongs to exactly one branch, declared
/// by its `namespace` in the OBO source.
///
/// # Examples
///
/// ```
/// use gopath::Branch;
///
/// let branch = Branch::from_namespace("cellular_component").unwrap();
/// assert_eq!(branch, Branch::CellularComponent);
/// assert_eq!(branch.to_string(), "CCO");
///
/// assert!(Branch::from_namespace("external").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Branch {
    /// `biological_process` (BPO)
    BiologicalProcess,
    /// `cellular_component` (CCO)
    CellularComponent,
    /// `molecular_function` (MFO)
    MolecularFunction,
}

impl Branch {
    /// All branches, in the order they are reported
    pub const ALL: [Branch; 3] = [
        Branch::CellularComponent,
        Branch::MolecularFunction,
        Branch::BiologicalProcess,
    ];

    /// Returns the branch of an OBO `namespace` value
    ///
    /// # Errors
    ///
    /// [`GoError::UnknownBranch`] if the namespace is not one of
    /// `biological_process`, `cellular_component` or `molecular_function`
    pub fn from_namespace(namespace: &str) -> GoResult<Self> {
        match namespace {
            "biological_process" => Ok(Branch::BiologicalProcess),
            "cellular_component" => Ok(Branch::CellularComponent),
            "molecular_function" => Ok(Branch::MolecularFunction),
            _ => Err(GoError::UnknownBranch(namespace.to_string())),
        }
    }

    /// Returns the OBO `namespace` value of the branch
    pub fn namespace(&self) -> &'static str {
        match self {
            Branch::BiologicalProcess => "biological_process",
            Branch::CellularComponent => "cellular_component",
            Branch::MolecularFunction => "molecular_function",
        }
    }

    /// Returns the three-letter abbreviation, e.g. `BPO`
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Branch::BiologicalProcess => "BPO",
            Branch::CellularComponent => "CCO",
            Branch::MolecularFunction => "MFO",
        }
    }
}

impl TryFrom<&str> for Branch {
    type Error = GoError;
    fn try_from(namespace: &str) -> GoResult<Self> {
        Branch::from_namespace(namespace)
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn namespaces_round_trip() {
        for branch in Branch::ALL {
            assert_eq!(Branch::from_namespace(branch.namespace()).unwrap(), branch);
        }
    }

    #[test]
    fn abbreviations() {
        assert_eq!(Branch::BiologicalProcess.abbreviation(), "BPO");
        assert_eq!(Branch::CellularComponent.abbreviation(), "CCO");
        assert_eq!(Branch::MolecularFunction.abbreviation(), "MFO");
    }

    #[test]
    fn unknown_namespace() {
        match Branch::try_from("Biological_Process") {
            Err(GoError::UnknownBranch(ns)) => assert_eq!(ns, "Biological_Process"),
            other => panic!("expected UnknownBranch, got {other:?}"),
        }
    }
}
