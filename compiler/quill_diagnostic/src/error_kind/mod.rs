use std::fmt;

/// Category of a runtime failure.
///
/// The first four kinds are produced by the value/operator core. The rest
/// belong to collaborators (macro calls, saving, custom macros) and are only
/// carried through unchanged.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// Type mismatch or invalid operator use.
    Operation,
    /// Malformed pattern or typed-variable construction.
    Syntax,
    /// Feature intentionally unsupported.
    Unimplemented,
    /// Missing key or index.
    Property,
    /// Wrong type of data given to a macro.
    Datatype,
    /// Macro call written incorrectly.
    MacroCall,
    /// Failure inside a custom macro's code hook.
    CustomMacro,
    /// Failure while saving or loading.
    Saving,
    /// Runaway repetition detected.
    Infinite,
    /// Error raised deliberately by the author.
    User,
    /// Error re-raised from an inner evaluation.
    Propagated,
}

/// Every kind paired with its stable name, in declaration order.
const NAMES: &[(ErrorKind, &str)] = &[
    (ErrorKind::Operation, "operation"),
    (ErrorKind::Syntax, "syntax"),
    (ErrorKind::Unimplemented, "unimplemented"),
    (ErrorKind::Property, "property"),
    (ErrorKind::Datatype, "datatype"),
    (ErrorKind::MacroCall, "macrocall"),
    (ErrorKind::CustomMacro, "custommacro"),
    (ErrorKind::Saving, "saving"),
    (ErrorKind::Infinite, "infinite"),
    (ErrorKind::User, "user"),
    (ErrorKind::Propagated, "propagated"),
];

impl ErrorKind {
    /// Stable lowercase name, as shown on error markers.
    pub fn as_str(self) -> &'static str {
        NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("operation", |(_, name)| name)
    }

    /// Parse a kind from its stable name.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(kind, _)| *kind)
    }

    /// Fixed explanation text shown behind an error marker.
    pub fn explanation(self) -> &'static str {
        match self {
            ErrorKind::Operation => {
                "I tried to perform an operation on some data, but the data's type was incorrect."
            }
            ErrorKind::Syntax => "The markup seems to contain a mistake.",
            ErrorKind::Unimplemented => "I don't support this particular feature.",
            ErrorKind::Property => {
                "I tried to access a value in a string, array or datamap, but I couldn't find it."
            }
            ErrorKind::Datatype => {
                "I tried to use a macro, but was given the wrong type of data for it."
            }
            ErrorKind::MacroCall => "I tried to use a macro, but its call wasn't written correctly.",
            ErrorKind::CustomMacro => {
                "I tried to use a custom macro, but its code hook had an error in it."
            }
            ErrorKind::Saving => "I tried to save or load the story, but I couldn't do it.",
            ErrorKind::Infinite => "I almost ended up doing the same thing over and over, forever.",
            ErrorKind::User => "This error was created on purpose by the story's author.",
            ErrorKind::Propagated => "This error came from code that ran somewhere else.",
        }
    }

    /// Kinds the value/operator core itself produces.
    pub fn is_core(self) -> bool {
        matches!(
            self,
            ErrorKind::Operation | ErrorKind::Syntax | ErrorKind::Unimplemented | ErrorKind::Property
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
