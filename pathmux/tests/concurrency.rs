use futures::future::join_all;
use pathmux::{Args, BoxError, Context, ServeMux, Signal, args, testing::CountingHandler};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_dispatch() {
    let mux: ServeMux = ServeMux::new();
    let counter = CountingHandler::new();
    mux.register("/work/", counter.clone());

    let tasks = (0..64).map(|i| {
        let mux = mux.clone();
        tokio::spawn(async move {
            mux.dispatch(Signal::new(), format!("/work/{i}"), args![i]).await
        })
    });

    for result in join_all(tasks).await {
        result.unwrap().unwrap();
    }
    assert_eq!(counter.count(), 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_register_while_dispatching() {
    let mux: ServeMux = ServeMux::new();
    let root = CountingHandler::new();
    mux.register("/", root.clone());

    let writer = {
        let mux = mux.clone();
        tokio::spawn(async move {
            for i in 0..50 {
                mux.register(&format!("/r{i}/"), CountingHandler::new());
                tokio::task::yield_now().await;
            }
        })
    };
    let readers = (0..8).map(|_| {
        let mux = mux.clone();
        tokio::spawn(async move {
            for i in 0..50 {
                // Either the root or the freshly registered prefix handles it.
                mux.dispatch(Signal::new(), format!("/r{i}/x"), args![]).await.unwrap();
            }
        })
    });

    writer.await.unwrap();
    for reader in join_all(readers).await {
        reader.unwrap();
    }
    assert_eq!(mux.len(), 51);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_handler_can_register_during_dispatch() {
    let mux: ServeMux = ServeMux::new();
    let hits = CountingHandler::new();

    let inner = mux.clone();
    let target = hits.clone();
    mux.register_fn("/install", move |_cx: Context<Args>| {
        let result = inner.try_register("/installed", target.clone());
        async move {
            result?;
            Ok::<(), BoxError>(())
        }
    });

    mux.dispatch(Signal::new(), "/install", args![]).await.unwrap();
    mux.dispatch(Signal::new(), "/installed", args![]).await.unwrap();

    assert_eq!(hits.count(), 1);
}
