use std::fmt::Display;

/// Name of the macro the generated source uses to turn a `GLenum` into its symbolic name
pub const ENUM_TO_STRING: &str = "E2S";

/// How an argument is rendered when it is passed to the trace `printf`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Pass the argument through unchanged
    Identity,
    /// Look up the symbolic name of an enum value
    EnumName,
    /// Widen a narrow unsigned value to `unsigned int`
    WidenUnsigned,
    /// Widen a narrow signed value to `int`
    WidenSigned,
}

impl Conversion {
    pub fn apply(&self, arg_name: &str) -> String {
        match self {
            Conversion::Identity => arg_name.to_string(),
            Conversion::EnumName => format!("{ENUM_TO_STRING}({arg_name})"),
            Conversion::WidenUnsigned => format!("(unsigned int)({arg_name})"),
            Conversion::WidenSigned => format!("(int)({arg_name})"),
        }
    }
}

macro_rules! type_catalogue {
    ($($variant:ident => $spelling:literal, $format:literal, $conversion:ident;)*) => {
        /// Every type spelling the tracer knows how to print.
        ///
        /// Spellings are matched exactly: `GLint*` and `const GLint*` are distinct entries.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum KnownType {
            $($variant,)*
        }

        impl KnownType {
            pub const ALL: &'static [KnownType] = &[$(KnownType::$variant,)*];

            /// The exact spelling of this type as it appears in a parsed declaration
            pub fn spelling(&self) -> &'static str {
                match self {
                    $(KnownType::$variant => $spelling,)*
                }
            }

            /// The `printf` format specifier for a value of this type. Empty for `void`.
            pub fn format(&self) -> &'static str {
                match self {
                    $(KnownType::$variant => $format,)*
                }
            }

            pub fn conversion(&self) -> Conversion {
                match self {
                    $(KnownType::$variant => Conversion::$conversion,)*
                }
            }
        }
    };
}

type_catalogue! {
    Void => "void", "", Identity;
    Empty => "", "", Identity;

    GLenum => "GLenum", "%s", EnumName;
    GLbitfield => "GLbitfield", "%u", WidenUnsigned;
    GLboolean => "GLboolean", "%u", WidenUnsigned;
    GLbyte => "GLbyte", "%u", WidenUnsigned;
    GLchar => "GLchar", "%u", WidenUnsigned;
    GLubyte => "GLubyte", "%u", WidenUnsigned;
    GLushort => "GLushort", "%u", WidenUnsigned;
    GLshort => "GLshort", "%i", WidenSigned;
    GLuint => "GLuint", "%u", Identity;
    GLint => "GLint", "%i", Identity;
    GLsizei => "GLsizei", "%i", Identity;
    GLfloat => "GLfloat", "%f", Identity;
    GLdouble => "GLdouble", "%f", Identity;
    GLuint64 => "GLuint64", "%zu", Identity;
    GLint64 => "GLint64", "%\" PRId64\"", Identity;
    GLsizeiptr => "GLsizeiptr", "%\" PRId64\"", Identity;
    GLintptr => "GLintptr", "%\" PRId64\"", Identity;
    GLsync => "GLsync", "%x", Identity;
    GLDEBUGPROC => "GLDEBUGPROC", "%p", Identity;
    ConstGLfloat => "const GLfloat", "%f", Identity;

    ConstGLfloatPtr => "const GLfloat*", "%p", Identity;
    ConstGLdoublePtr => "const GLdouble*", "%p", Identity;
    ConstGLintPtr => "const GLint*", "%p", Identity;
    ConstGLuintPtr => "const GLuint*", "%p", Identity;
    ConstGLvoidPtr => "const GLvoid*", "%p", Identity;
    ConstVoidPtr => "const void*", "%p", Identity;
    ConstGLenumPtr => "const GLenum*", "%p", Identity;
    ConstGLcharPtr => "const GLchar*", "%p", Identity;
    ConstGLubytePtr => "const GLubyte*", "%p", Identity;
    ConstGLsizeiPtr => "const GLsizei*", "%p", Identity;
    ConstGLuint64Ptr => "const GLuint64*", "%p", Identity;
    ConstGLint64Ptr => "const GLint64*", "%p", Identity;
    ConstGLintptrPtr => "const GLintptr*", "%p", Identity;
    ConstGLsizeiptrPtr => "const GLsizeiptr*", "%p", Identity;
    ConstGLcharPtrConstPtr => "const GLchar* const*", "%p", Identity;
    VoidPtrPtr => "void**", "%p", Identity;
    GLfloatPtr => "GLfloat*", "%p", Identity;
    GLdoublePtr => "GLdouble*", "%p", Identity;
    GLintPtr => "GLint*", "%p", Identity;
    GLuintPtr => "GLuint*", "%p", Identity;
    GLvoidPtr => "GLvoid*", "%p", Identity;
    VoidPtr => "void*", "%p", Identity;
    GLenumPtr => "GLenum*", "%p", Identity;
    GLcharPtr => "GLchar*", "%p", Identity;
    GLubytePtr => "GLubyte*", "%p", Identity;
    GLbooleanPtr => "GLboolean*", "%p", Identity;
    GLsizeiPtr => "GLsizei*", "%p", Identity;
    GLuint64Ptr => "GLuint64*", "%p", Identity;
    GLint64Ptr => "GLint64*", "%p", Identity;
    GLintptrPtr => "GLintptr*", "%p", Identity;
}

impl KnownType {
    pub fn is_void(&self) -> bool {
        matches!(self, KnownType::Void | KnownType::Empty)
    }
}

impl Display for KnownType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

/// The result of looking a type spelling up in the catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CType {
    Known(KnownType),
    Unrecognized(String),
}

impl CType {
    pub fn from_spelling(spelling: &str) -> CType {
        KnownType::ALL
            .iter()
            .find(|t| t.spelling() == spelling)
            .map(|t| CType::Known(*t))
            .unwrap_or_else(|| CType::Unrecognized(spelling.to_string()))
    }
}

/// The catalogue spellings closest to `spelling`, nearest first
pub fn closest_spellings(spelling: &str, count: usize) -> Vec<&'static str> {
    let mut distances: Vec<(usize, &'static str)> = KnownType::ALL
        .iter()
        .map(|t| (levenshtein::levenshtein(t.spelling(), spelling), t.spelling()))
        .collect();

    distances.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(b.1)));
    distances.into_iter().take(count).map(|(_, s)| s).collect()
}
