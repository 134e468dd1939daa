use crate::{create_test_config, create_test_fetcher, mount_page, news_page};
use news_harvest::dispatch::channel;
use news_harvest::harvest::FetchHooks;
use news_harvest::output::{BatchWriter, LineFormat};
use news_harvest::targets::read_target_list;
use std::fs::File;
use std::io::{BufWriter, Write};
use tempfile::{NamedTempFile, TempDir};
use wiremock::MockServer;

#[tokio::test]
async fn test_batch_run_writes_output_file() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/world.html",
        news_page(&[
            ("Multi\nline headline", "/w/1", None),
            ("Plain headline", "/yandsearch?cl4url=example.com/w/2", None),
        ]),
    )
    .await;

    let mut list = NamedTempFile::new().unwrap();
    writeln!(list, "# world news").unwrap();
    writeln!(list, "{}/world.html", server.uri()).unwrap();
    writeln!(list).unwrap();
    writeln!(list, "{}/missing.html", server.uri()).unwrap();
    list.flush().unwrap();
    let targets = read_target_list(list.path()).unwrap();
    assert_eq!(targets.len(), 2);

    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("news.txt");
    let out = BufWriter::new(File::create(&out_path).unwrap());

    let config = create_test_config();
    let (dispatcher, dispatch_loop) =
        channel::<BatchWriter<BufWriter<File>>>(config.dispatch.poll_interval());

    let on_result = dispatcher.clone();
    let on_done = dispatcher.clone();
    let hooks = FetchHooks::new()
        .on_result(move |outcome| {
            on_result.push(move |writer: &mut BatchWriter<BufWriter<File>>| {
                writer.record(&outcome).unwrap();
            });
        })
        .on_done(move || {
            on_done.push(|writer: &mut BatchWriter<BufWriter<File>>| writer.mark_done());
            on_done.push_shutdown();
        });

    let pool = create_test_fetcher().run(config.fetch.concurrency as usize, targets, hooks);
    let writer = dispatch_loop
        .run(BatchWriter::new(out, LineFormat::with_urls(Some(" | ".to_string()))))
        .await;
    pool.wait().await;

    assert!(writer.is_done());
    let stats = writer.stats();
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.items, 2);
    writer.into_inner().unwrap();

    let written = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(
        written,
        format!(
            "Multi ... line headline | {}/w/1\nPlain headline | http://example.com/w/2\n",
            server.uri()
        )
    );
}
