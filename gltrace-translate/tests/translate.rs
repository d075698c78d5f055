mod common;

use gltrace_translate::{error::Error, translate_api, KnownType};
use indoc::indoc;

const HEADER: &str = indoc!(
    r#"
    #ifndef GLAPI
    #define GLAPI extern
    #endif
    GLAPI void APIENTRY glClear (GLbitfield mask);
    GLAPI void APIENTRY glClearColor (GLfloat red, GLfloat green, GLfloat blue, GLfloat alpha);
    GLAPI const GLubyte *APIENTRY glGetString (GLenum name);
    GLAPI void APIENTRY glShaderSource (GLuint shader, GLsizei count, const GLchar *const*string, const GLint *length);
    GLAPI GLenum APIENTRY glGetError (void);
    GLAPI void APIENTRY glAttachObjectARB (GLhandleARB containerObj, GLhandleARB obj);
    "#
);

#[test]
fn translate_keeps_declaration_order() -> Result<(), Box<dyn std::error::Error>> {
    common::init_log();

    let signatures = common::signatures(HEADER, "glGetError\nglClearColor\nglClear\n")?;
    let api = translate_api(&signatures)?;

    let names: Vec<&str> = api.iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, vec!["glClear", "glClearColor", "glGetError"]);

    let sorted: Vec<&str> = api.sorted_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(sorted, vec!["glClear", "glClearColor", "glGetError"]);

    assert!(api.contains("glClear"));
    assert!(!api.contains("glShaderSource"));
    assert!(api.get("glShaderSource").is_none());

    let clear_color = api.get("glClearColor").unwrap();
    assert!(clear_color.returns_void());
    assert!(clear_color
        .arguments()
        .iter()
        .all(|a| a.ty() == KnownType::GLfloat));

    let get_error = api.get("glGetError").unwrap();
    assert_eq!(get_error.result(), KnownType::GLenum);
    assert!(get_error.arguments().is_empty());

    Ok(())
}

#[test]
fn translate_pointer_types() -> Result<(), Box<dyn std::error::Error>> {
    common::init_log();

    let signatures = common::signatures(HEADER, "glGetString\nglShaderSource\n")?;
    let api = translate_api(&signatures)?;

    let get_string = api.get("glGetString").unwrap();
    assert_eq!(get_string.result(), KnownType::ConstGLubytePtr);
    assert_eq!(get_string.arguments()[0].trace_value(), "E2S(name)");

    let shader_source = api.get("glShaderSource").unwrap();
    let types: Vec<KnownType> = shader_source.arguments().iter().map(|a| a.ty()).collect();
    assert_eq!(
        types,
        vec![
            KnownType::GLuint,
            KnownType::GLsizei,
            KnownType::ConstGLcharPtrConstPtr,
            KnownType::ConstGLintPtr
        ]
    );

    Ok(())
}

#[test]
fn translate_unknown_type_fails() -> Result<(), Box<dyn std::error::Error>> {
    common::init_log();

    let signatures = common::signatures(HEADER, "glClear\nglAttachObjectARB\n")?;
    let err = translate_api(&signatures).unwrap_err();

    match &err {
        Error::TranslateFunction { name, .. } => assert_eq!(name, "glAttachObjectARB"),
        e => panic!("unexpected error {e}"),
    }
    assert!(err.is_unknown_type());
    assert_eq!(err.unknown_type_name(), Some("GLhandleARB"));

    Ok(())
}

#[test]
fn unwrapped_unknown_types_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    common::init_log();

    let signatures = common::signatures(HEADER, "glClear\n")?;
    let api = translate_api(&signatures)?;
    assert_eq!(api.len(), 1);

    Ok(())
}
