use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn synthetic_tree() -> wii_arc::ArcDir {
    use wii_arc::{ArcDir, ArcFile};

    let mut root = ArcDir::default();
    for d in 0..16 {
        let mut dir = ArcDir::new(format!("dir_{d:02}"));
        for f in 0..32 {
            dir.add_file(ArcFile::new(format!("file_{f:02}.bin"), vec![f as u8; 512]));
        }
        root.add_dir(dir);
    }
    root
}

pub mod read {
    use divan::Bencher;
    use wii_arc::{load, save, ArcWriterOptions};

    fn get_input() -> Vec<u8> {
        save(&super::synthetic_tree(), ArcWriterOptions::builder().build()).unwrap()
    }

    #[divan::bench]
    fn decode(bencher: Bencher) {
        bencher.with_inputs(get_input).bench_refs(|data| {
            divan::black_box(load(data).unwrap());
        });
    }

    #[divan::bench]
    fn resolve_file(bencher: Bencher) {
        bencher
            .with_inputs(|| load(&get_input()).unwrap())
            .bench_refs(|root| {
                divan::black_box(root.get_file("dir_15/file_31.bin").unwrap());
            });
    }
}

pub mod write {
    use divan::Bencher;
    use wii_arc::{save, ArcWriterOptions};

    #[divan::bench]
    fn encode(bencher: Bencher) {
        bencher
            .with_inputs(super::synthetic_tree)
            .bench_refs(|root| {
                divan::black_box(save(root, ArcWriterOptions::builder().build()).unwrap());
            });
    }
}
