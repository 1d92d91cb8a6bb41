use std::fs;
use std::path::Path;

use crate::error::ShaderError;

/// A vertex/fragment GLSL pair, not yet submitted to the driver.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn from_strings(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    pub fn from_files(
        vertex: impl AsRef<Path>,
        fragment: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_path = vertex.as_ref();
        let fragment_path = fragment.as_ref();
        let vertex = fs::read_to_string(vertex_path)?;
        let fragment = fs::read_to_string(fragment_path)?;
        log::debug!(
            "loaded shader sources from {} and {}",
            vertex_path.display(),
            fragment_path.display()
        );
        Ok(Self { vertex, fragment })
    }

    /// The built-in textured Phong pair from [`builtin`].
    pub fn builtin() -> Self {
        Self::from_strings(builtin::VERTEX_SRC, builtin::FRAGMENT_SRC)
    }
}

/// Default shader pair: a model/view/projection vertex transform feeding a
/// textured Phong fragment stage with an emission mask, a soft-edged
/// spotlight cone, and distance attenuation.
pub mod builtin {
    pub const VERTEX_SRC: &str = r#"
    #version 330 core
    layout (location = 0) in vec3 aPos;
    layout (location = 1) in vec2 aTexCoord;
    layout (location = 2) in vec3 aNormal;

    out vec2 TexCoord;
    out vec3 FragPos;
    out vec3 Normal;

    uniform mat4 model;
    uniform mat4 view;
    uniform mat4 projection;

    void main() {
        gl_Position = projection * view * model * vec4(aPos, 1.0);
        TexCoord = aTexCoord;
        FragPos = vec3(model * vec4(aPos, 1.0));
        Normal = mat3(transpose(inverse(model))) * aNormal;
    }
    "#;

    pub const FRAGMENT_SRC: &str = r#"
    #version 330 core
    struct Material {
        vec3 ambient;
        vec3 diffuse;
        vec3 specular;
        float shininess;
    };

    struct Light {
        vec3 position;
        vec3 direction;
        float cutOff;
        float outerCutOff;
        vec3 ambient;
        vec3 diffuse;
        vec3 specular;
        float constant;
        float linear;
        float quadratic;
    };

    out vec4 FragColor;

    in vec2 TexCoord;
    in vec3 FragPos;
    in vec3 Normal;

    uniform sampler2D texture1;
    uniform sampler2D texture2;
    uniform sampler2D emission;
    uniform Material material;
    uniform Light light;
    uniform vec3 lightPos;
    uniform vec3 viewPos;

    void main() {
        FragColor = mix(texture(texture1, TexCoord), texture(texture2, TexCoord), 0.5);

        // Emission shows only where the overlay texture is black.
        vec3 mask = step(vec3(1.0), vec3(1.0) - texture(texture2, TexCoord).rgb);
        FragColor += vec4(texture(emission, TexCoord).rgb * mask, 1.0);

        vec3 ambient = light.ambient * material.ambient;

        vec3 norm = normalize(Normal);
        vec3 lightDir = normalize(lightPos - FragPos);
        float diff = max(dot(norm, lightDir), 0.0);
        vec3 diffuse = light.diffuse * (diff * material.diffuse);

        vec3 viewDir = normalize(viewPos - FragPos);
        vec3 reflectDir = reflect(-lightDir, norm);
        float spec = pow(max(dot(viewDir, reflectDir), 0.0), material.shininess);
        vec3 specular = light.specular * spec * vec3(texture(texture2, TexCoord));

        // Spotlight cone with soft edges.
        float theta = dot(lightDir, normalize(-light.direction));
        float epsilon = light.cutOff - light.outerCutOff;
        float intensity = clamp((theta - light.outerCutOff) / epsilon, 0.0, 1.0);
        diffuse *= intensity;
        specular *= intensity;

        float dist = length(light.position - FragPos);
        float attenuation = 1.0
            / (light.constant + light.linear * dist + light.quadratic * dist * dist);
        ambient *= attenuation;
        diffuse *= attenuation;
        specular *= attenuation;

        FragColor *= vec4(ambient + diffuse + specular, 1.0);
    }
    "#;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_pair_is_plausible_glsl() {
        let source = ShaderSource::builtin();
        assert!(source.vertex.trim_start().starts_with("#version 330 core"));
        assert!(source.fragment.trim_start().starts_with("#version 330 core"));
        assert!(source.vertex.contains("uniform mat4 projection"));
        assert!(source.fragment.contains("uniform Material material"));
    }

    #[test]
    fn from_files_reads_both_stages() {
        let dir = tempfile::tempdir().unwrap();
        let vert_path = dir.path().join("demo.vert");
        let frag_path = dir.path().join("demo.frag");
        let mut vert = std::fs::File::create(&vert_path).unwrap();
        write!(vert, "void main() {{}}").unwrap();
        let mut frag = std::fs::File::create(&frag_path).unwrap();
        write!(frag, "void main() {{}}").unwrap();

        let source = ShaderSource::from_files(&vert_path, &frag_path).unwrap();
        assert_eq!(source.vertex, "void main() {}");
        assert_eq!(source.fragment, "void main() {}");
    }

    #[test]
    fn from_files_surfaces_missing_file_as_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShaderSource::from_files(
            dir.path().join("missing.vert"),
            dir.path().join("missing.frag"),
        );
        assert!(matches!(result, Err(crate::ShaderError::Io(_))));
    }
}
