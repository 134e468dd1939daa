use crate::{create_test_fetcher, mount_page, news_page};
use news_harvest::board::{BoardStatus, NewsBoard};
use news_harvest::dispatch::{channel, DispatchLoop, LoopStatus};
use std::time::Duration;
use wiremock::MockServer;

const INTERVAL: Duration = Duration::from_millis(10);

async fn drive_until_idle(board: &mut NewsBoard, dispatch_loop: &mut DispatchLoop<NewsBoard>) {
    while board.is_busy() {
        assert_eq!(dispatch_loop.poll(board), LoopStatus::Continue);
        tokio::time::sleep(INTERVAL).await;
    }
}

async fn start_server() -> MockServer {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/politics.html",
        news_page(&[
            ("Politics one", "/p/1", Some("Summary")),
            ("Politics two", "/yandsearch?cl4url=lenta.ru/p/2", None),
        ]),
    )
    .await;
    server
}

#[tokio::test]
async fn test_reload_renders_successful_results_only() {
    let server = start_server().await;
    let (dispatcher, mut dispatch_loop) = channel(INTERVAL);
    let mut board = NewsBoard::new(
        create_test_fetcher(),
        dispatcher,
        vec![
            format!("{}/politics.html", server.uri()),
            format!("{}/missing.html", server.uri()),
        ],
        2,
    );

    board.reload().unwrap();
    drive_until_idle(&mut board, &mut dispatch_loop).await;

    assert_eq!(board.status(), BoardStatus::Done);
    assert_eq!(board.lines(), &["Politics one".to_string(), "Politics two".to_string()]);
    assert_eq!(board.stats().completed, 2);
    assert_eq!(board.stats().failed, 1);
    assert_eq!(board.copy().unwrap(), "Politics one\nPolitics two");
}

#[tokio::test]
async fn test_show_url_applies_to_next_reload() {
    let server = start_server().await;
    let (dispatcher, mut dispatch_loop) = channel(INTERVAL);
    let mut board = NewsBoard::new(
        create_test_fetcher(),
        dispatcher,
        vec![format!("{}/politics.html", server.uri())],
        1,
    );

    board.set_show_url(true).unwrap();
    board.reload().unwrap();
    drive_until_idle(&mut board, &mut dispatch_loop).await;

    assert_eq!(
        board.lines(),
        &[
            format!("Politics one {}/p/1", server.uri()),
            "Politics two http://lenta.ru/p/2".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_close_after_cycle_ends_run() {
    let server = start_server().await;
    let (dispatcher, dispatch_loop) = channel::<NewsBoard>(INTERVAL);
    let mut board = NewsBoard::new(
        create_test_fetcher(),
        dispatcher.clone(),
        vec![format!("{}/politics.html", server.uri())],
        1,
    );

    board.reload().unwrap();
    // Close once the cycle finishes, from inside the consumer thread
    let closer = dispatcher.clone();
    let watcher = tokio::spawn(async move {
        loop {
            tokio::time::sleep(INTERVAL).await;
            closer.push(|board: &mut NewsBoard| {
                if !board.is_busy() {
                    let _ = board.close();
                }
            });
            if closer.is_closed() {
                break;
            }
        }
    });

    let mut board = dispatch_loop.run(board).await;
    watcher.await.unwrap();
    let pool = board.take_pool().expect("cycle pool handle");
    pool.wait().await;

    assert!(board.is_pool_finished());
    assert_eq!(board.status(), BoardStatus::Done);
    assert_eq!(board.lines().len(), 2);
    assert!(dispatcher.is_closed());
}
