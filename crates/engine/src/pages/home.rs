use crate::element::TextBlock;
use crate::layer::Layer;
use crate::page::Page;
use crate::router::Route;
use crate::types::{HorizontalAlign, Rgb, Rgba, Vec2, VerticalAlign};

use super::BuildCtx;

const TITLE: &str = "    :::     :::        :::::::::: :::    ::: 
  :+: :+:   :+:        :+:        :+:    :+: 
 +:+   +:+  +:+        +:+         +:+  +:+  
+#++:++#++: +#+        +#++:++#     +#++:+   
+#+     +#+ +#+        +#+         +#+  +#+  
#+#     #+# #+#        #+#        #+#    #+# 
###     ### ########## ########## ###    ### 


CREATIVE DEVELOPER";

const TITLE_MOBILE: &str = "   :::    ::     :::::  ::    ::
  +: :+   :+     :+      +:  :+
 ++   ++  +:     +:       :++: 
+#+:++#+: +#     +#++#    #++#  
+#     #+ +#     +#      #+  +# 
#+     +# #+     #+     +#    #+
##     ## ###### ##### ##      ##


CREATIVE DEVELOPER";

const LOCATION: &str = "based in : Lisbon\n\nfrom: Madeira\n";

pub fn home_page(ctx: &mut BuildCtx<'_>) -> Page {
    let res = ctx.field.resolution();
    let mut page = Page::new("home", Route::Home);
    let mut main = Layer::new("home");

    let title = if ctx.field.is_mobile { TITLE_MOBILE } else { TITLE };
    main.add_element(
        TextBlock::new(title, Vec2::new(5.0, 4.0))
            .with_color(Rgb::WHITE)
            .aligned(HorizontalAlign::Start, VerticalAlign::Start, res),
    );
    main.add_element(
        TextBlock::new(LOCATION, Vec2::new(5.0, -4.0))
            .with_background(Rgba::new(0.4, 0.4, 0.6, 0.05))
            .aligned(HorizontalAlign::Start, VerticalAlign::End, res),
    );

    page.add_layer(main);
    page
}
