use std::path::PathBuf;

use gltrace::{generate, generate_from_files, write_generated, Error, GenerateOptions, GeneratorConfig};
use indoc::indoc;

const HEADER: &str = indoc!(
    r#"
    #ifndef GLAPI
    #define GLAPI extern
    #endif
    typedef void (APIENTRYP PFNGLCLEARPROC) (GLbitfield mask);
    GLAPI void APIENTRY glClear (GLbitfield mask);
    GLAPI void APIENTRY glFlush (void);
    GLAPI void APIENTRY glEnable (GLenum cap);
    GLAPI GLenum APIENTRY glGetError (void);
    GLAPI void APIENTRY glAttachObjectARB (GLhandleARB containerObj, GLhandleARB obj);
    "#
);

fn init_log() {
    gltrace_util::init_log("warn");
}

#[test]
fn generate_clear() -> Result<(), Error> {
    init_log();

    let generated = generate("glClear\n", HEADER, &GenerateOptions::default())?;

    let expected = "#include <string>\n\
                    #include <inttypes.h>\n\
                    \n\
                    namespace\n\
                    {\n\
                    \tGL4API apiHook;\n\
                    } // namespace\n\
                    \n\
                    using PFNGETGLPROC = void* (const char*);\n\
                    \n\
                    #define E2S( en ) Enum2String( en ).c_str()\n\
                    extern std::string Enum2String( GLenum e );\n\
                    \n\
                    void GLTracer_glClear(GLbitfield mask)\n\
                    {\n\
                    \tprintf(\"glClear(\" \"%u)\\n\", (unsigned int)(mask));\n\
                    \tapiHook.glClear(mask);\n\
                    \tassert(apiHook.glGetError() == GL_NO_ERROR);\n\
                    }\n\
                    \n\
                    #define INJECT(S) api->S = &GLTracer_##S;\n\
                    \n\
                    void InjectAPITracer4(GL4API* api)\n\
                    {\n\
                    \tapiHook = *api;\n\
                    \tINJECT(glClear);\n\
                    }\n\
                    \n\
                    #define LOAD_GL_FUNC(func) api->func = ( decltype(api->func) )GetGLProc(#func);\n\
                    \n\
                    void GetAPI4(GL4API* api, PFNGETGLPROC GetGLProc)\n\
                    {\n\
                    \tLOAD_GL_FUNC(glClear);\n\
                    }\n\
                    \n";

    assert!(gltrace_util::compare(&generated.trace_source, expected).is_ok());
    assert_eq!(
        generated.api_struct,
        format!("\tPFNGLCLEARPROC{}glClear;\n", "\t".repeat(13))
    );

    Ok(())
}

#[test]
fn error_query_is_loaded_but_not_hooked() -> Result<(), Error> {
    init_log();

    let generated = generate("glGetError\nglEnable\n", HEADER, &GenerateOptions::default())?;
    let source = &generated.trace_source;

    assert!(source.contains("GLenum GLTracer_glGetError()\n"));
    assert!(source.contains("\tGLenum const r = apiHook.glGetError();\n"));
    assert!(!source.contains("INJECT(glGetError);"));
    assert!(source.contains("\tINJECT(glEnable);\n"));
    assert!(source.contains("\tLOAD_GL_FUNC(glEnable);\n\tLOAD_GL_FUNC(glGetError);\n"));

    Ok(())
}

#[test]
fn unknown_type_fails_generation() {
    init_log();

    let result = generate("glClear\nglAttachObjectARB\n", HEADER, &GenerateOptions::default());
    match result {
        Err(e) => assert_eq!(e.unknown_type_name(), Some("GLhandleARB")),
        Ok(_) => panic!("generation should fail on GLhandleARB"),
    }
}

#[test]
fn unwrapped_functions_are_ignored() -> Result<(), Error> {
    init_log();

    let generated = generate("glFlush\n", HEADER, &GenerateOptions::default())?;
    assert!(!generated.trace_source.contains("glClear"));
    assert!(!generated.trace_source.contains("glAttachObjectARB"));
    assert!(generated.trace_source.contains("void GLTracer_glFlush()\n"));
    assert!(generated.trace_source.contains("\tprintf(\"glFlush()\\n\");\n"));

    Ok(())
}

#[test]
fn generation_is_deterministic() -> Result<(), Error> {
    init_log();

    let first = generate("glEnable\nglClear\nglGetError\n", HEADER, &GenerateOptions::default())?;
    let second = generate("glGetError\nglClear\nglEnable\nglClear\n", HEADER, &GenerateOptions::default())?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn annotated_function_list() -> Result<(), Error> {
    init_log();

    let generated = generate(
        "// core\n4.0 glEnable\n4.0\tglClear\n",
        HEADER,
        &GenerateOptions::default(),
    )?;

    let lines: Vec<&str> = generated.api_struct.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("\tglClear;"));
    assert!(lines[1].ends_with("\tglEnable;"));

    Ok(())
}

#[test]
fn blank_line_in_function_list_fails() {
    init_log();

    let result = generate("glClear\n\nglEnable\n", HEADER, &GenerateOptions::default());
    assert!(matches!(
        result,
        Err(Error::Extract(gltrace_extract::error::Error::BlankWrapListLine { line: 2, .. }))
    ));
}

#[test]
fn missing_input_is_an_io_error() {
    init_log();

    let config = GeneratorConfig {
        funcs_list: PathBuf::from("this/file/does/not/exist.txt"),
        ..Default::default()
    };

    assert!(matches!(
        generate_from_files(&config),
        Err(Error::Extract(gltrace_extract::error::Error::Io { .. }))
    ));
}

#[test]
fn generate_and_write_files() -> Result<(), gltrace_util::Error> {
    gltrace_util::run_test(|| {
        let dir = std::env::temp_dir().join(format!("gltrace-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir)?;

        let config = GeneratorConfig {
            funcs_list: dir.join("funcs_list.txt"),
            header: dir.join("glcorearb.h"),
            trace_output: Some(dir.join("GLAPITrace.h")),
            api_struct_output: dir.join("GLAPI.h"),
            ..Default::default()
        };

        std::fs::write(&config.funcs_list, "glEnable\nglClear\n")?;
        std::fs::write(&config.header, HEADER)?;

        let generated = generate_from_files(&config)?;
        write_generated(&generated, &config)?;

        assert_eq!(std::fs::read_to_string(dir.join("GLAPITrace.h"))?, generated.trace_source);
        assert_eq!(std::fs::read_to_string(dir.join("GLAPI.h"))?, generated.api_struct);

        std::fs::remove_dir_all(&dir)?;

        Ok(())
    })
}

#[test]
fn failed_trace_write_leaves_struct_untouched() -> Result<(), gltrace_util::Error> {
    gltrace_util::run_test(|| {
        let dir = std::env::temp_dir().join(format!("gltrace-partial-{}", std::process::id()));
        std::fs::create_dir_all(&dir)?;

        let config = GeneratorConfig {
            trace_output: Some(dir.join("missing").join("GLAPITrace.h")),
            api_struct_output: dir.join("GLAPI.h"),
            ..Default::default()
        };

        let generated = generate("glClear\n", HEADER, &GenerateOptions::default())?;
        let result = write_generated(&generated, &config);

        assert!(matches!(
            result,
            Err(Error::Write(gltrace_write::error::Error::FailedToWriteFile { .. }))
        ));
        assert!(!dir.join("GLAPI.h").exists());

        std::fs::remove_dir_all(&dir)?;

        Ok(())
    })
}
