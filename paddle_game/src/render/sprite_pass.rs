use crate::render::ShaderProgram;
use amethyst::assets::Handle;
use amethyst::core::ecs::shred::SystemData;
use amethyst::core::ecs::{
    Component, DenseVecStorage, DispatcherBuilder, Join, ReadStorage, World, WorldExt,
};
use amethyst::core::transform::Transform;
use amethyst::renderer::bundle::{RenderOrder, RenderPlan, Target};
use amethyst::renderer::pipeline::{PipelineDescBuilder, PipelinesBuilder};
use amethyst::renderer::rendy::command::{QueueId, RenderPassEncoder};
use amethyst::renderer::rendy::graph::render::{PrepareResult, RenderGroup};
use amethyst::renderer::rendy::graph::{GraphContext, NodeBuffer, NodeImage};
use amethyst::renderer::rendy::hal::device::Device;
use amethyst::renderer::rendy::hal::pass::Subpass;
use amethyst::renderer::rendy::hal::pso::InputAssemblerDesc;
use amethyst::renderer::rendy::hal::*;
use amethyst::renderer::rendy::mesh::{AsVertex, VertexFormat};
use amethyst::renderer::rendy::shader::Shader;
use amethyst::renderer::rendy::*;
use amethyst::renderer::submodules::{
    DynamicVertexBuffer, FlatEnvironmentSub, TextureId, TextureSub,
};
use amethyst::renderer::{util, RenderPlugin, Texture};
use amethyst::renderer::{Backend, Factory, Format, RenderGroupDesc};
use derivative::Derivative;
use glsl_layout::*;

const QUAD_VERTEX_COUNT: u32 = 6;
// one column-major mat4
const MODEL_CONSTANTS_SIZE: u32 = 64;

const QUAD_POSITIONS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

const QUAD_TEX_COORDS: [[f32; 2]; 6] = [
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [1.0, 0.0],
    [0.0, 0.0],
];

/// Fixed draw order: left paddle, right paddle, ball.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum SpriteSlot {
    LeftPaddle,
    RightPaddle,
    Ball,
}

#[derive(Clone, Debug)]
pub struct Sprite {
    pub slot: SpriteSlot,
    pub texture: Handle<Texture>,
}

impl Component for Sprite {
    type Storage = DenseVecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct DrawSpritesDesc {
    shaders: ShaderProgram,
}

impl DrawSpritesDesc {
    pub fn new(shaders: ShaderProgram) -> Self {
        Self { shaders }
    }
}

impl<B: Backend> RenderGroupDesc<B, World> for DrawSpritesDesc {
    fn build<'a>(
        self,
        _ctx: &GraphContext<B>,
        factory: &mut Factory<B>,
        _queue: QueueId,
        _aux: &World,
        framebuffer_width: u32,
        framebuffer_height: u32,
        subpass: Subpass<'_, B>,
        _buffers: Vec<NodeBuffer>,
        _images: Vec<NodeImage>,
    ) -> Result<Box<dyn RenderGroup<B, World>>, failure::Error> {
        let env = FlatEnvironmentSub::new(factory)?;
        let textures = TextureSub::new(factory)?;
        let vertex = DynamicVertexBuffer::new();

        let (pipeline, pipeline_layout) = build_sprite_pipeline(
            factory,
            subpass,
            framebuffer_width,
            framebuffer_height,
            &self.shaders,
            vec![env.raw_layout(), textures.raw_layout()],
        )?;

        Ok(Box::new(DrawSprites::<B> {
            pipeline,
            pipeline_layout,
            env,
            textures,
            vertex,
            sprites: Vec::new(),
        }))
    }
}

#[derive(Debug)]
struct PreparedSprite {
    texture: TextureId,
    model: [u32; 16],
}

#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct DrawSprites<B: Backend> {
    pipeline: B::GraphicsPipeline,
    pipeline_layout: B::PipelineLayout,
    env: FlatEnvironmentSub<B>,
    textures: TextureSub<B>,
    vertex: DynamicVertexBuffer<B, QuadVertex>,
    sprites: Vec<PreparedSprite>,
}

impl<B: Backend> RenderGroup<B, World> for DrawSprites<B> {
    fn prepare(
        &mut self,
        factory: &Factory<B>,
        _queue: QueueId,
        index: usize,
        _subpass: Subpass<'_, B>,
        aux: &World,
    ) -> PrepareResult {
        let (sprites, transforms) =
            <(ReadStorage<'_, Sprite>, ReadStorage<'_, Transform>)>::fetch(aux);
        self.env.process(factory, index, aux);

        let mut ordered = (&sprites, &transforms).join().collect::<Vec<_>>();
        ordered.sort_by_key(|(sprite, _)| sprite.slot);

        self.sprites.clear();
        for (sprite, transform) in ordered {
            // None until the texture asset is available
            if let Some((texture, _)) = self.textures.insert(
                factory,
                aux,
                &sprite.texture,
                hal::image::Layout::ShaderReadOnlyOptimal,
            ) {
                self.sprites.push(PreparedSprite {
                    texture,
                    model: model_constants(transform),
                });
            }
        }
        self.textures.maintain(factory, aux);

        let quad = unit_quad();
        self.vertex.write(
            factory,
            index,
            QUAD_VERTEX_COUNT as u64,
            Some(&quad[..]),
        );
        PrepareResult::DrawRecord
    }

    fn draw_inline(
        &mut self,
        mut encoder: RenderPassEncoder<'_, B>,
        index: usize,
        _subpass: Subpass<'_, B>,
        _aux: &World,
    ) {
        if self.sprites.is_empty() {
            return;
        }
        let layout = &self.pipeline_layout;
        encoder.bind_graphics_pipeline(&self.pipeline);
        self.env.bind(index, layout, 0, &mut encoder);
        if !self.vertex.bind(index, 0, 0, &mut encoder) {
            return;
        }
        for sprite in &self.sprites {
            if !self.textures.loaded(sprite.texture) {
                continue;
            }
            self.textures.bind(layout, 1, sprite.texture, &mut encoder);
            unsafe {
                encoder.push_constants(layout, pso::ShaderStageFlags::VERTEX, 0, &sprite.model);
                encoder.draw(0..QUAD_VERTEX_COUNT, 0..1);
            }
        }
    }

    fn dispose(self: Box<Self>, factory: &mut Factory<B>, _aux: &World) {
        unsafe {
            factory.device().destroy_graphics_pipeline(self.pipeline);
            factory
                .device()
                .destroy_pipeline_layout(self.pipeline_layout);
        }
    }
}

fn build_sprite_pipeline<B: Backend>(
    factory: &Factory<B>,
    subpass: hal::pass::Subpass<'_, B>,
    framebuffer_width: u32,
    framebuffer_height: u32,
    shaders: &ShaderProgram,
    layouts: Vec<&B::DescriptorSetLayout>,
) -> Result<(B::GraphicsPipeline, B::PipelineLayout), failure::Error> {
    let shader_vertex = unsafe { shaders.vertex.module(factory)? };
    let shader_fragment = match unsafe { shaders.fragment.module(factory) } {
        Ok(module) => module,
        Err(e) => {
            unsafe {
                factory.destroy_shader_module(shader_vertex);
            }
            return Err(e.into());
        }
    };

    let pipeline_layout = unsafe {
        factory.device().create_pipeline_layout(
            layouts,
            vec![(pso::ShaderStageFlags::VERTEX, 0..MODEL_CONSTANTS_SIZE)],
        )
    }?;

    let pipes = PipelinesBuilder::new()
        .with_pipeline(
            PipelineDescBuilder::new()
                .with_vertex_desc(&[(QuadVertex::vertex(), pso::VertexInputRate::Vertex)])
                .with_input_assembler(InputAssemblerDesc::new(Primitive::TriangleList))
                .with_shaders(util::simple_shader_set(
                    &shader_vertex,
                    Some(&shader_fragment),
                ))
                .with_layout(&pipeline_layout)
                .with_subpass(subpass)
                .with_framebuffer_size(framebuffer_width, framebuffer_height)
                .with_blend_targets(vec![pso::ColorBlendDesc {
                    mask: pso::ColorMask::ALL,
                    blend: Some(pso::BlendState::ALPHA),
                }]),
        )
        .build(factory, None);

    unsafe {
        factory.destroy_shader_module(shader_vertex);
        factory.destroy_shader_module(shader_fragment);
    }

    match pipes {
        Err(e) => {
            unsafe {
                factory.device().destroy_pipeline_layout(pipeline_layout);
            }
            Err(e)
        }
        Ok(mut pipes) => Ok((pipes.remove(0), pipeline_layout)),
    }
}

/// The sprite's model matrix as raw push constant words, column-major.
fn model_constants(transform: &Transform) -> [u32; 16] {
    let model: [[f32; 4]; 4] = transform.matrix().into();
    let mut constants = [0; 16];
    for (constant, value) in constants.iter_mut().zip(model.iter().flatten()) {
        *constant = value.to_bits();
    }
    constants
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, AsStd140)]
#[repr(C, align(4))]
pub struct QuadVertex {
    pub pos: vec2,
    pub tex_coord: vec2,
}

impl AsVertex for QuadVertex {
    fn vertex() -> VertexFormat {
        VertexFormat::new((
            (Format::Rg32Sfloat, "pos"),
            (Format::Rg32Sfloat, "tex_coord"),
        ))
    }
}

/// Two triangles covering a unit square centred on the origin.
fn unit_quad() -> Vec<QuadVertex> {
    QUAD_POSITIONS
        .iter()
        .zip(QUAD_TEX_COORDS.iter())
        .map(|(pos, tex_coord)| QuadVertex {
            pos: (*pos).into(),
            tex_coord: (*tex_coord).into(),
        })
        .collect()
}

#[derive(Debug)]
pub struct RenderSprites {
    shaders: ShaderProgram,
}

impl RenderSprites {
    pub fn new(shaders: ShaderProgram) -> Self {
        Self { shaders }
    }
}

impl<B: Backend> RenderPlugin<B> for RenderSprites {
    fn on_build<'a, 'b>(
        &mut self,
        world: &mut World,
        _builder: &mut DispatcherBuilder<'a, 'b>,
    ) -> Result<(), amethyst::Error> {
        world.register::<Sprite>();
        Ok(())
    }

    fn on_plan(
        &mut self,
        plan: &mut RenderPlan<B>,
        _factory: &mut Factory<B>,
        _world: &World,
    ) -> Result<(), amethyst::Error> {
        let shaders = self.shaders.clone();
        plan.extend_target(Target::Main, move |ctx| {
            ctx.add(
                RenderOrder::Transparent,
                DrawSpritesDesc::new(shaders).builder(),
            )?;
            Ok(())
        });
        Ok(())
    }
}
