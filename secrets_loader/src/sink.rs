use embuild::cargo::set_rustc_env;

use crate::flags::BuildFlag;

/// The build system's list of compiler definitions. The loader only ever
/// appends to it.
pub trait DefinitionSink {
    fn append_flag(&mut self, flag: &BuildFlag);
}

impl DefinitionSink for Vec<String> {
    fn append_flag(&mut self, flag: &BuildFlag) {
        self.push(flag.to_string());
    }
}

impl<S: DefinitionSink + ?Sized> DefinitionSink for &mut S {
    fn append_flag(&mut self, flag: &BuildFlag) {
        (**self).append_flag(flag);
    }
}

/// Hands each definition to Cargo as a `rustc-env` value, so the crate being
/// built can read it with `env!`. Only meaningful inside a build script.
#[derive(Debug, Default, Clone, Copy)]
pub struct CargoEnvSink;

impl DefinitionSink for CargoEnvSink {
    fn append_flag(&mut self, flag: &BuildFlag) {
        set_rustc_env(flag.name(), flag.value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_rendered_flags() {
        let mut sink: Vec<String> = vec!["-DEXISTING=1".to_string()];
        sink.append_flag(&BuildFlag::new("DEFAULT_WIFI_SSID", "lab"));
        assert_eq!(sink, vec!["-DEXISTING=1", r#"-DDEFAULT_WIFI_SSID="lab""#]);
    }

    fn append_through<S: DefinitionSink>(mut sink: S) {
        sink.append_flag(&BuildFlag::new("A", "b"));
    }

    #[test]
    fn mutable_reference_forwards() {
        let mut inner: Vec<String> = Vec::new();
        append_through(&mut inner);
        assert_eq!(inner, vec![r#"-DA="b""#]);
    }
}
