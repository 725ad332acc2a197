/// WGSL shader for lit, per-vertex colored scene geometry.
pub const SCENE_SHADER: &str = r#"
struct Light {
    position: vec4<f32>,
    color: vec4<f32>,
};

struct Uniforms {
    view_proj: mat4x4<f32>,
    ambient: vec4<f32>,
    lights: array<Light, 3>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.world_position = vertex.position;
    out.world_normal = vertex.normal;
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front_facing: bool) -> @location(0) vec4<f32> {
    // Back faces (roof undersides) are lit from their own side.
    let n = normalize(in.world_normal);
    let normal = select(-n, n, front_facing);
    var lighting = uniforms.ambient.rgb;
    for (var i = 0u; i < 3u; i = i + 1u) {
        let light = uniforms.lights[i];
        let to_light = normalize(light.position.xyz - in.world_position);
        lighting = lighting + light.color.rgb * max(dot(normal, to_light), 0.0);
    }
    return vec4<f32>(in.color.rgb * min(lighting, vec3<f32>(1.0)), in.color.a);
}
"#;
